//! Deserialization of the upstream sets-and-cards JSON document.
//!
//! The document is a single object keyed by set code. Only the fields the
//! importer consumes are modelled; everything else is ignored by serde.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The whole source document: set code → set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SourceDocument {
    pub sets: BTreeMap<String, SourceSet>,
}

impl SourceDocument {
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Sets in release-date order.
    ///
    /// Ties are broken by set code, so two runs over the same document always
    /// visit sets (and therefore cards) in the same order.
    pub fn sorted_sets(&self) -> Vec<(&str, &SourceSet)> {
        // BTreeMap iteration is already code-ordered; a stable sort keeps that
        // order within one release date.
        let mut sets: Vec<(&str, &SourceSet)> =
            self.sets.iter().map(|(code, set)| (code.as_str(), set)).collect();
        sets.sort_by_key(|(_, set)| set.release_date);
        sets
    }

    /// Total number of card records across all sets.
    pub fn card_count(&self) -> usize {
        self.sets.values().map(|s| s.cards.len()).sum()
    }
}

/// Parse the document at `path`.
pub fn load_document(path: &Path) -> Result<SourceDocument, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    SourceDocument::from_reader(BufReader::new(file))
}

/// One set (expansion) in the source document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSet {
    pub name: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub magic_cards_info_code: Option<String>,
    #[serde(default)]
    pub cards: Vec<CardRecord>,
}

/// One card record: a single printing of a card within a set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub subtypes: Vec<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub power: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub toughness: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub original_text: Option<String>,
    #[serde(default)]
    pub original_type: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub number: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub flavor: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub timeshifted: bool,
    #[serde(default)]
    pub layout: Option<String>,
    /// Names of every face/part this card is physically printed with,
    /// usually including its own name.
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default, rename = "multiverseid")]
    pub multiverse_id: Option<i64>,
    #[serde(default)]
    pub foreign_names: Vec<ForeignName>,
    #[serde(default)]
    pub rulings: Vec<SourceRuling>,
}

/// A localized name for a card record.
#[derive(Debug, Clone, Deserialize)]
pub struct ForeignName {
    pub language: String,
    pub name: String,
    #[serde(default, rename = "multiverseid")]
    pub multiverse_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceRuling {
    pub date: NaiveDate,
    pub text: String,
}

/// Power, toughness, loyalty and number show up as either JSON strings or
/// JSON numbers depending on the document revision.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        None => None,
        Some(TextOrNumber::Text(s)) => Some(s),
        Some(TextOrNumber::Int(n)) => Some(n.to_string()),
        Some(TextOrNumber::Float(f)) => Some(f.to_string()),
    })
}
