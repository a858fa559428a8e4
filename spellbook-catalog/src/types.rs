//! Data model types for the normalized card catalog.
//!
//! Attribute bundles (`CardAttributes`, `PrintingAttributes`) are what the
//! field extractor produces from a source record. Row types carry a database
//! identifier and are what read queries return.

use chrono::NaiveDate;

// ── Extracted attributes ────────────────────────────────────────────────────

/// Every mutable Card column, derived from one card record.
#[derive(Debug, Clone, PartialEq)]
pub struct CardAttributes {
    pub name: String,
    pub mana_cost: Option<String>,
    pub cmc: f64,
    /// 5-bit mask, see [`crate::Color`].
    pub colors: u8,
    pub color_identity: u8,
    pub num_colors: u32,
    pub type_line: String,
    pub subtype: String,
    pub power: Option<String>,
    pub num_power: f64,
    pub toughness: Option<String>,
    pub num_toughness: f64,
    pub loyalty: Option<String>,
    pub num_loyalty: f64,
    pub rules_text: Option<String>,
    pub layout: String,
}

/// Collector number split into its numeric part and optional letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectorNumber {
    pub number: u32,
    pub letter: Option<String>,
}

/// Every mutable CardPrinting column plus the collector number that forms
/// part of its natural key.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintingAttributes {
    pub collector: CollectorNumber,
    /// Rarity name after the timeshifted override.
    pub rarity: String,
    pub flavor_text: Option<String>,
    pub artist: String,
    pub original_text: Option<String>,
    pub original_type: Option<String>,
}

// ── Rows ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: i64,
    pub name: String,
    pub release_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardSet {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub release_date: NaiveDate,
    pub block_id: Option<i64>,
    pub magic_cards_info_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: i64,
    pub attributes: CardAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardPrinting {
    pub id: i64,
    pub card_id: i64,
    pub set_id: i64,
    pub collector_number: u32,
    pub collector_letter: Option<String>,
    pub rarity_id: i64,
    pub flavor_text: Option<String>,
    pub artist: String,
    pub original_text: Option<String>,
    pub original_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPrintingLanguage {
    pub id: i64,
    pub card_printing_id: i64,
    pub language_id: i64,
    pub card_name: String,
    pub multiverse_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRuling {
    pub id: i64,
    pub card_id: i64,
    pub date: NaiveDate,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalCard {
    pub id: i64,
    pub layout: String,
}

// ── Import Tracking ─────────────────────────────────────────────────────────

/// Log entry for one import run.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    pub source_name: String,
    pub imported_at: String,
    pub records_created: i64,
    pub records_updated: i64,
    pub records_unchanged: i64,
    pub links_skipped: i64,
}
