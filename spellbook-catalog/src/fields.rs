//! Field extraction: derive normalized attribute values from one card record.
//!
//! Everything here is a pure function of the record (plus, for collector
//! numbers, a caller-supplied fallback counter). The source format has a few
//! undocumented quirks encoded here:
//!
//! ```text
//! number  "10a" → 10 + "a"     "a10" → 10 + "a"     "★" → running counter
//! power   "1+*" → 1.0          "*"   → 0.0
//! rarity  timeshifted: true → "Timeshifted" regardless of stated rarity
//! layout  third part of a 3-name meld → "meld-back"
//! ```

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::reference::TIMESHIFTED;
use crate::source::CardRecord;
use crate::types::{CardAttributes, CollectorNumber, PrintingAttributes};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unrecognized color '{0}'")]
    UnknownColor(String),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d.]+").expect("leading number pattern is valid"));

static COLLECTOR_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)?(\d+)([A-Za-z]+)?$").expect("collector number pattern is valid")
});

const DEFAULT_LAYOUT: &str = "normal";
const MELD_LAYOUT: &str = "meld";
const MELD_BACK_LAYOUT: &str = "meld-back";

// ── Colors ──────────────────────────────────────────────────────────────────

/// One of the five card colors, each owning a fixed bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    pub fn bit(self) -> u8 {
        match self {
            Self::White => 1,
            Self::Blue => 2,
            Self::Black => 4,
            Self::Red => 8,
            Self::Green => 16,
        }
    }

    /// Accepts full names in any case, and the single-letter symbols used
    /// by color identity lists.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "white" | "w" => Some(Self::White),
            "blue" | "u" => Some(Self::Blue),
            "black" | "b" => Some(Self::Black),
            "red" | "r" => Some(Self::Red),
            "green" | "g" => Some(Self::Green),
            _ => None,
        }
    }
}

/// OR together the bits of every listed color.
pub fn color_mask<S: AsRef<str>>(colors: &[S]) -> Result<u8, FieldError> {
    colors.iter().try_fold(0u8, |mask, name| {
        let name = name.as_ref();
        Color::from_name(name)
            .map(|c| mask | c.bit())
            .ok_or_else(|| FieldError::UnknownColor(name.to_string()))
    })
}

pub fn color_count(mask: u8) -> u32 {
    mask.count_ones()
}

// ── Numbers ─────────────────────────────────────────────────────────────────

/// Best-effort numeric value of a power/toughness/loyalty field.
///
/// Takes the leading run of digits and dots; anything unparsable, or an
/// absent field, is 0.
pub fn parse_leading_number(text: Option<&str>) -> f64 {
    text.and_then(|t| LEADING_NUMBER.find(t))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Split a source collector number into number and letter.
///
/// A leading letter group wins over a trailing one. When the field is absent
/// or doesn't fit the pattern, `fallback` (the caller's running per-set
/// counter) is used with no letter.
pub fn split_collector_number(number: Option<&str>, fallback: u32) -> CollectorNumber {
    let parsed = number.and_then(|n| COLLECTOR_NUMBER.captures(n)).and_then(|caps| {
        let digits = caps.get(2)?.as_str().parse::<u32>().ok()?;
        let letter = caps.get(1).or_else(|| caps.get(3)).map(|m| m.as_str().to_string());
        Some(CollectorNumber {
            number: digits,
            letter,
        })
    });

    parsed.unwrap_or(CollectorNumber {
        number: fallback,
        letter: None,
    })
}

// ── Rarity ──────────────────────────────────────────────────────────────────

pub fn resolve_rarity(rarity: &str, timeshifted: bool) -> &str {
    if timeshifted { TIMESHIFTED } else { rarity }
}

// ── Types and layout ────────────────────────────────────────────────────────

pub fn combined_types(record: &CardRecord) -> String {
    record.types.join(" ")
}

pub fn combined_subtypes(record: &CardRecord) -> String {
    record.subtypes.join(" ")
}

/// Position of a record within a three-part meld.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeldRole {
    /// One of the two cards that are printed and melded together.
    Front,
    /// The combined card printed across the backs of the fronts.
    Back,
}

/// Meld cards list three names: the two fronts, then the melded back.
pub fn meld_role(record: &CardRecord) -> Option<MeldRole> {
    if record.layout.as_deref() != Some(MELD_LAYOUT) || record.names.len() != 3 {
        return None;
    }
    if record.names[2] == record.name {
        Some(MeldRole::Back)
    } else {
        Some(MeldRole::Front)
    }
}

/// Layout tag stored for the card and its physical card.
pub fn effective_layout(record: &CardRecord) -> String {
    if meld_role(record) == Some(MeldRole::Back) {
        return MELD_BACK_LAYOUT.to_string();
    }
    record
        .layout
        .clone()
        .unwrap_or_else(|| DEFAULT_LAYOUT.to_string())
}

// ── Bundles ─────────────────────────────────────────────────────────────────

/// Derive every Card attribute from a record.
pub fn extract_card(record: &CardRecord) -> Result<CardAttributes, FieldError> {
    let colors = color_mask(&record.colors)?;
    let color_identity = color_mask(&record.color_identity)?;

    Ok(CardAttributes {
        name: record.name.clone(),
        mana_cost: record.mana_cost.clone(),
        cmc: record.cmc.unwrap_or(0.0),
        colors,
        color_identity,
        num_colors: color_count(colors),
        type_line: combined_types(record),
        subtype: combined_subtypes(record),
        power: record.power.clone(),
        num_power: parse_leading_number(record.power.as_deref()),
        toughness: record.toughness.clone(),
        num_toughness: parse_leading_number(record.toughness.as_deref()),
        loyalty: record.loyalty.clone(),
        num_loyalty: parse_leading_number(record.loyalty.as_deref()),
        rules_text: record.text.clone(),
        layout: effective_layout(record),
    })
}

/// Derive every CardPrinting attribute from a record.
///
/// `fallback_number` is the running per-set counter for this record.
pub fn extract_printing(
    record: &CardRecord,
    fallback_number: u32,
) -> Result<PrintingAttributes, FieldError> {
    let artist = record
        .artist
        .clone()
        .ok_or(FieldError::MissingField("artist"))?;
    let rarity = record
        .rarity
        .as_deref()
        .ok_or(FieldError::MissingField("rarity"))?;

    Ok(PrintingAttributes {
        collector: split_collector_number(record.number.as_deref(), fallback_number),
        rarity: resolve_rarity(rarity, record.timeshifted).to_string(),
        flavor_text: record.flavor.clone(),
        artist,
        original_text: record.original_text.clone(),
        original_type: record.original_type.clone(),
    })
}
