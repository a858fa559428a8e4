//! Per-record reconciliation: card → printing → localized printings.
//!
//! Each card record is resolved against the store in a fixed order, because
//! every step needs the id produced by the one before it:
//!
//! ```text
//! card (by name)            insert, or overwrite every attribute
//!   └ printing (by card, set, number, letter)
//!                           insert, or overwrite mutable attributes
//!       └ printing language (by printing, language), English first
//!                           insert only; existing rows are never touched
//! ```
//!
//! The localized printings are returned as [`PhysicalCandidate`]s so the
//! physical-card pass can run once every record in the document is stored.

use rusqlite::Connection;
use spellbook_catalog::types::{CardAttributes, CollectorNumber, PrintingAttributes};
use spellbook_catalog::{CardRecord, ENGLISH, MeldRole, extract_card, extract_printing, meld_role};
use spellbook_db::operations;

use crate::driver::ImportStats;
use crate::error::ImportError;

/// What a resolve-or-write step did, carrying the row id either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created(i64),
    Updated(i64),
    Existing(i64),
}

impl Outcome {
    pub fn id(self) -> i64 {
        match self {
            Self::Created(id) | Self::Updated(id) | Self::Existing(id) => id,
        }
    }
}

/// The set a record belongs to, as already stored.
#[derive(Debug, Clone)]
pub struct SetContext {
    pub id: i64,
    pub code: String,
}

/// A localized printing that still needs a physical card.
#[derive(Debug, Clone)]
pub struct PhysicalCandidate {
    pub card_printing_language_id: i64,
    pub language_id: i64,
    pub language: String,
    pub set_id: i64,
    pub set_code: String,
    pub card_name: String,
    pub collector: CollectorNumber,
    pub layout: String,
    /// Every name printed on the same physical object, per the source.
    pub names: Vec<String>,
    pub meld: Option<MeldRole>,
}

/// Resolve a card by name and insert or overwrite it.
pub fn upsert_card(conn: &Connection, card: &CardAttributes) -> Result<Outcome, ImportError> {
    match operations::find_card(conn, &card.name)? {
        Some(id) => {
            operations::update_card(conn, id, card)?;
            Ok(Outcome::Updated(id))
        }
        None => Ok(Outcome::Created(operations::insert_card(conn, card)?)),
    }
}

/// Resolve a printing by its natural key and insert or overwrite it.
pub fn upsert_printing(
    conn: &Connection,
    card_id: i64,
    set_id: i64,
    rarity_id: i64,
    printing: &PrintingAttributes,
) -> Result<Outcome, ImportError> {
    match operations::find_printing(conn, card_id, set_id, &printing.collector)? {
        Some(id) => {
            operations::update_printing(conn, id, rarity_id, printing)?;
            Ok(Outcome::Updated(id))
        }
        None => Ok(Outcome::Created(operations::insert_printing(
            conn, card_id, set_id, rarity_id, printing,
        )?)),
    }
}

/// Resolve a localized printing, creating it only if absent.
pub fn ensure_printing_language(
    conn: &Connection,
    card_printing_id: i64,
    language_id: i64,
    card_name: &str,
    multiverse_id: Option<i64>,
) -> Result<Outcome, ImportError> {
    match operations::find_printing_language(conn, card_printing_id, language_id)? {
        Some(id) => Ok(Outcome::Existing(id)),
        None => Ok(Outcome::Created(operations::insert_printing_language(
            conn,
            card_printing_id,
            language_id,
            card_name,
            multiverse_id,
        )?)),
    }
}

/// Reconcile one card record.
///
/// `fallback_number` is the running per-set counter, used when the record
/// has no usable collector number.
pub fn import_card(
    conn: &Connection,
    set: &SetContext,
    record: &CardRecord,
    fallback_number: u32,
    stats: &mut ImportStats,
) -> Result<Vec<PhysicalCandidate>, ImportError> {
    let card_attrs =
        extract_card(record).map_err(|e| ImportError::field(&record.name, &set.code, e))?;
    let printing_attrs = extract_printing(record, fallback_number)
        .map_err(|e| ImportError::field(&record.name, &set.code, e))?;

    let card_id = match upsert_card(conn, &card_attrs)? {
        Outcome::Created(id) => {
            stats.cards_created += 1;
            id
        }
        outcome => {
            stats.cards_updated += 1;
            outcome.id()
        }
    };

    let rarity_id = operations::find_rarity(conn, &printing_attrs.rarity)?.ok_or_else(|| {
        ImportError::UnknownRarity {
            card: record.name.clone(),
            set: set.code.clone(),
            rarity: printing_attrs.rarity.clone(),
        }
    })?;

    let printing_id = match upsert_printing(conn, card_id, set.id, rarity_id, &printing_attrs)? {
        Outcome::Created(id) => {
            stats.printings_created += 1;
            id
        }
        outcome => {
            stats.printings_updated += 1;
            outcome.id()
        }
    };

    let localized = std::iter::once((ENGLISH, record.name.as_str(), record.multiverse_id)).chain(
        record
            .foreign_names
            .iter()
            .map(|f| (f.language.as_str(), f.name.as_str(), f.multiverse_id)),
    );

    let meld = meld_role(record);
    let mut candidates = Vec::new();
    for (language, name, multiverse_id) in localized {
        let language_id = operations::find_language(conn, language)?.ok_or_else(|| {
            ImportError::UnknownLanguage {
                card: record.name.clone(),
                set: set.code.clone(),
                language: language.to_string(),
            }
        })?;

        let outcome =
            ensure_printing_language(conn, printing_id, language_id, name, multiverse_id)?;
        match outcome {
            Outcome::Created(_) => stats.languages_created += 1,
            _ => stats.languages_existing += 1,
        }

        candidates.push(PhysicalCandidate {
            card_printing_language_id: outcome.id(),
            language_id,
            language: language.to_string(),
            set_id: set.id,
            set_code: set.code.clone(),
            card_name: record.name.clone(),
            collector: printing_attrs.collector.clone(),
            layout: card_attrs.layout.clone(),
            names: record.names.clone(),
            meld,
        });
    }

    Ok(candidates)
}
