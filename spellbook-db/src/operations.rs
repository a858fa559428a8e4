//! Natural-key resolution and write primitives for every catalog entity.
//!
//! `find_*` functions look up an existing row by its natural key and return
//! its id. The store enforces those keys with unique indexes, but every
//! resolver still checks the result count: more than one row for a key that
//! should be unique is reported as [`OperationError::Duplicate`] instead of
//! picking one.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Params, params};
use spellbook_catalog::reference::{LANGUAGES, RARITIES};
use spellbook_catalog::types::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: &'static str, id: String },
    #[error("Integrity violation: {count} {entity_type} rows share the key {key}")]
    Duplicate {
        entity_type: &'static str,
        key: String,
        count: usize,
    },
}

/// Run a single-column id query and insist on at most one row.
fn find_unique<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    entity_type: &'static str,
    key: impl FnOnce() -> String,
) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare_cached(sql)?;
    let ids = stmt
        .query_map(params, |row| row.get::<_, i64>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    match ids.as_slice() {
        [] => Ok(None),
        [id] => Ok(Some(*id)),
        _ => Err(OperationError::Duplicate {
            entity_type,
            key: key(),
            count: ids.len(),
        }),
    }
}

fn expect_changed(changed: usize, entity_type: &'static str, id: i64) -> Result<(), OperationError> {
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type,
            id: id.to_string(),
        });
    }
    Ok(())
}

// ── Reference Data ──────────────────────────────────────────────────────────

/// Statistics from seeding the reference tables.
#[derive(Debug, Default)]
pub struct SeedStats {
    pub rarities: usize,
    pub languages: usize,
}

/// Insert every rarity and language that isn't already present.
pub fn seed_reference_data(conn: &Connection) -> Result<SeedStats, OperationError> {
    let mut stats = SeedStats::default();

    for rarity in RARITIES {
        stats.rarities += conn.execute(
            "INSERT INTO rarities (symbol, name, display_order) VALUES (?1, ?2, ?3)
             ON CONFLICT DO NOTHING",
            params![rarity.symbol, rarity.name, rarity.display_order],
        )?;
    }

    for language in LANGUAGES {
        stats.languages += conn.execute(
            "INSERT INTO languages (name, code) VALUES (?1, ?2)
             ON CONFLICT(name) DO NOTHING",
            params![language.name, language.code],
        )?;
    }

    Ok(stats)
}

pub fn find_rarity(conn: &Connection, name: &str) -> Result<Option<i64>, OperationError> {
    find_unique(
        conn,
        "SELECT id FROM rarities WHERE name = ?1",
        params![name],
        "rarity",
        || format!("name='{name}'"),
    )
}

pub fn find_language(conn: &Connection, name: &str) -> Result<Option<i64>, OperationError> {
    find_unique(
        conn,
        "SELECT id FROM languages WHERE name = ?1",
        params![name],
        "language",
        || format!("name='{name}'"),
    )
}

// ── Block and Set Operations ────────────────────────────────────────────────

pub fn find_block(conn: &Connection, name: &str) -> Result<Option<i64>, OperationError> {
    find_unique(
        conn,
        "SELECT id FROM blocks WHERE name = ?1",
        params![name],
        "block",
        || format!("name='{name}'"),
    )
}

/// Insert a block, or pull its release date back if this sighting is earlier.
///
/// Returns the block id.
pub fn upsert_block(
    conn: &Connection,
    name: &str,
    release_date: NaiveDate,
) -> Result<i64, OperationError> {
    let id = conn.query_row(
        "INSERT INTO blocks (name, release_date) VALUES (?1, ?2)
         ON CONFLICT(name) DO UPDATE SET
             release_date = MIN(release_date, excluded.release_date)
         RETURNING id",
        params![name, release_date],
        |row| row.get(0),
    )?;
    Ok(id)
}

pub fn find_set(conn: &Connection, code: &str) -> Result<Option<i64>, OperationError> {
    find_unique(
        conn,
        "SELECT id FROM sets WHERE code = ?1",
        params![code],
        "set",
        || format!("code='{code}'"),
    )
}

/// Insert a set, or refresh its external catalog code if it already exists.
///
/// Returns the set id.
pub fn upsert_set(
    conn: &Connection,
    code: &str,
    name: &str,
    release_date: NaiveDate,
    block_id: Option<i64>,
    magic_cards_info_code: Option<&str>,
) -> Result<i64, OperationError> {
    let id = conn.query_row(
        "INSERT INTO sets (code, name, release_date, block_id, magic_cards_info_code)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(code) DO UPDATE SET
             magic_cards_info_code = excluded.magic_cards_info_code
         RETURNING id",
        params![code, name, release_date, block_id, magic_cards_info_code],
        |row| row.get(0),
    )?;
    Ok(id)
}

// ── Card Operations ─────────────────────────────────────────────────────────

pub fn find_card(conn: &Connection, name: &str) -> Result<Option<i64>, OperationError> {
    find_unique(
        conn,
        "SELECT id FROM cards WHERE name = ?1",
        params![name],
        "card",
        || format!("name='{name}'"),
    )
}

/// Insert a new card. Returns the generated id.
pub fn insert_card(conn: &Connection, card: &CardAttributes) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO cards (name, mana_cost, cmc, colors, color_identity, num_colors,
             type, subtype, power, num_power, toughness, num_toughness,
             loyalty, num_loyalty, rules_text, layout)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            card.name,
            card.mana_cost,
            card.cmc,
            card.colors,
            card.color_identity,
            card.num_colors,
            card.type_line,
            card.subtype,
            card.power,
            card.num_power,
            card.toughness,
            card.num_toughness,
            card.loyalty,
            card.num_loyalty,
            card.rules_text,
            card.layout,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite every mutable attribute of an existing card.
pub fn update_card(
    conn: &Connection,
    id: i64,
    card: &CardAttributes,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE cards SET
             mana_cost = ?2, cmc = ?3, colors = ?4, color_identity = ?5, num_colors = ?6,
             type = ?7, subtype = ?8, power = ?9, num_power = ?10,
             toughness = ?11, num_toughness = ?12, loyalty = ?13, num_loyalty = ?14,
             rules_text = ?15, layout = ?16
         WHERE id = ?1",
        params![
            id,
            card.mana_cost,
            card.cmc,
            card.colors,
            card.color_identity,
            card.num_colors,
            card.type_line,
            card.subtype,
            card.power,
            card.num_power,
            card.toughness,
            card.num_toughness,
            card.loyalty,
            card.num_loyalty,
            card.rules_text,
            card.layout,
        ],
    )?;
    expect_changed(changed, "card", id)
}

// ── Printing Operations ─────────────────────────────────────────────────────

/// Find a printing by (card, set, collector number, collector letter).
///
/// A missing letter only matches other printings without one.
pub fn find_printing(
    conn: &Connection,
    card_id: i64,
    set_id: i64,
    collector: &CollectorNumber,
) -> Result<Option<i64>, OperationError> {
    find_unique(
        conn,
        "SELECT id FROM card_printings
         WHERE card_id = ?1 AND set_id = ?2 AND collector_number = ?3
           AND collector_letter IS ?4",
        params![card_id, set_id, collector.number, collector.letter],
        "card printing",
        || {
            format!(
                "card={card_id} set={set_id} number={} letter={:?}",
                collector.number, collector.letter
            )
        },
    )
}

/// Insert a new printing. Returns the generated id.
pub fn insert_printing(
    conn: &Connection,
    card_id: i64,
    set_id: i64,
    rarity_id: i64,
    printing: &PrintingAttributes,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO card_printings (card_id, set_id, collector_number, collector_letter,
             rarity_id, flavor_text, artist, original_text, original_type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            card_id,
            set_id,
            printing.collector.number,
            printing.collector.letter,
            rarity_id,
            printing.flavor_text,
            printing.artist,
            printing.original_text,
            printing.original_type,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite the mutable attributes of an existing printing.
pub fn update_printing(
    conn: &Connection,
    id: i64,
    rarity_id: i64,
    printing: &PrintingAttributes,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE card_printings SET
             rarity_id = ?2, flavor_text = ?3, artist = ?4,
             original_text = ?5, original_type = ?6
         WHERE id = ?1",
        params![
            id,
            rarity_id,
            printing.flavor_text,
            printing.artist,
            printing.original_text,
            printing.original_type,
        ],
    )?;
    expect_changed(changed, "card printing", id)
}

// ── Printing Language Operations ────────────────────────────────────────────

pub fn find_printing_language(
    conn: &Connection,
    card_printing_id: i64,
    language_id: i64,
) -> Result<Option<i64>, OperationError> {
    find_unique(
        conn,
        "SELECT id FROM card_printing_languages
         WHERE card_printing_id = ?1 AND language_id = ?2",
        params![card_printing_id, language_id],
        "card printing language",
        || format!("printing={card_printing_id} language={language_id}"),
    )
}

/// Insert a localized printing. Returns the generated id.
pub fn insert_printing_language(
    conn: &Connection,
    card_printing_id: i64,
    language_id: i64,
    card_name: &str,
    multiverse_id: Option<i64>,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO card_printing_languages (card_printing_id, language_id, card_name, multiverse_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![card_printing_id, language_id, card_name, multiverse_id],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Physical Card Operations ────────────────────────────────────────────────

/// Whether a localized printing is already attached to any physical card.
pub fn printing_language_has_link(
    conn: &Connection,
    card_printing_language_id: i64,
) -> Result<bool, OperationError> {
    let found = conn
        .query_row(
            "SELECT 1 FROM physical_card_links WHERE card_printing_language_id = ?1 LIMIT 1",
            params![card_printing_language_id],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn find_physical_card_link(
    conn: &Connection,
    physical_card_id: i64,
    card_printing_language_id: i64,
) -> Result<Option<i64>, OperationError> {
    find_unique(
        conn,
        "SELECT id FROM physical_card_links
         WHERE physical_card_id = ?1 AND card_printing_language_id = ?2",
        params![physical_card_id, card_printing_language_id],
        "physical card link",
        || format!("physical_card={physical_card_id} printing_language={card_printing_language_id}"),
    )
}

/// Insert a physical card. Returns the generated id.
pub fn insert_physical_card(conn: &Connection, layout: &str) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO physical_cards (layout) VALUES (?1)",
        params![layout],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Link a localized printing to a physical card.
///
/// Returns `false` when the link already existed.
pub fn insert_physical_card_link(
    conn: &Connection,
    physical_card_id: i64,
    card_printing_language_id: i64,
) -> Result<bool, OperationError> {
    let inserted = conn.execute(
        "INSERT INTO physical_card_links (physical_card_id, card_printing_language_id)
         VALUES (?1, ?2)
         ON CONFLICT DO NOTHING",
        params![physical_card_id, card_printing_language_id],
    )?;
    Ok(inserted > 0)
}

// ── Ruling Operations ───────────────────────────────────────────────────────

/// Delete every ruling. Returns the number removed.
pub fn clear_rulings(conn: &Connection) -> Result<usize, OperationError> {
    Ok(conn.execute("DELETE FROM card_rulings", [])?)
}

/// Insert a ruling unless an identical (date, text, card) row exists.
///
/// Returns `false` for a duplicate.
pub fn insert_ruling(
    conn: &Connection,
    card_id: i64,
    date: NaiveDate,
    text: &str,
) -> Result<bool, OperationError> {
    let inserted = conn.execute(
        "INSERT INTO card_rulings (card_id, date, text) VALUES (?1, ?2, ?3)
         ON CONFLICT DO NOTHING",
        params![card_id, date, text],
    )?;
    Ok(inserted > 0)
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Insert an import log entry. Returns the generated id.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source_name, imported_at, records_created,
             records_updated, records_unchanged, links_skipped)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            log.source_name,
            log.imported_at,
            log.records_created,
            log.records_updated,
            log.records_unchanged,
            log.links_skipped,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
