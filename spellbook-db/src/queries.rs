//! Read queries for the catalog database.

use rusqlite::{Connection, OptionalExtension, Row, params};
use spellbook_catalog::types::*;

use crate::operations::OperationError;

// ── Stats ───────────────────────────────────────────────────────────────────

/// Row counts for every catalog table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub blocks: i64,
    pub sets: i64,
    pub cards: i64,
    pub printings: i64,
    pub printing_languages: i64,
    pub rulings: i64,
    pub physical_cards: i64,
    pub physical_card_links: i64,
}

pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |table: &str| -> Result<i64, OperationError> {
        let n = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?;
        Ok(n)
    };

    Ok(CatalogStats {
        blocks: count("blocks")?,
        sets: count("sets")?,
        cards: count("cards")?,
        printings: count("card_printings")?,
        printing_languages: count("card_printing_languages")?,
        rulings: count("card_rulings")?,
        physical_cards: count("physical_cards")?,
        physical_card_links: count("physical_card_links")?,
    })
}

// ── Sets and Blocks ─────────────────────────────────────────────────────────

pub fn get_block_by_name(conn: &Connection, name: &str) -> Result<Option<Block>, OperationError> {
    let block = conn
        .query_row(
            "SELECT id, name, release_date FROM blocks WHERE name = ?1",
            params![name],
            |row| {
                Ok(Block {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    release_date: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(block)
}

pub fn get_set_by_code(conn: &Connection, code: &str) -> Result<Option<CardSet>, OperationError> {
    let set = conn
        .query_row(
            "SELECT id, code, name, release_date, block_id, magic_cards_info_code
             FROM sets WHERE code = ?1",
            params![code],
            |row| {
                Ok(CardSet {
                    id: row.get(0)?,
                    code: row.get(1)?,
                    name: row.get(2)?,
                    release_date: row.get(3)?,
                    block_id: row.get(4)?,
                    magic_cards_info_code: row.get(5)?,
                })
            },
        )
        .optional()?;
    Ok(set)
}

// ── Cards and Printings ─────────────────────────────────────────────────────

pub fn find_card_by_name(conn: &Connection, name: &str) -> Result<Option<Card>, OperationError> {
    let card = conn
        .query_row(
            "SELECT id, name, mana_cost, cmc, colors, color_identity, num_colors,
                    type, subtype, power, num_power, toughness, num_toughness,
                    loyalty, num_loyalty, rules_text, layout
             FROM cards WHERE name = ?1",
            params![name],
            row_to_card,
        )
        .optional()?;
    Ok(card)
}

fn row_to_card(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        attributes: CardAttributes {
            name: row.get(1)?,
            mana_cost: row.get(2)?,
            cmc: row.get(3)?,
            colors: row.get(4)?,
            color_identity: row.get(5)?,
            num_colors: row.get(6)?,
            type_line: row.get(7)?,
            subtype: row.get(8)?,
            power: row.get(9)?,
            num_power: row.get(10)?,
            toughness: row.get(11)?,
            num_toughness: row.get(12)?,
            loyalty: row.get(13)?,
            num_loyalty: row.get(14)?,
            rules_text: row.get(15)?,
            layout: row.get(16)?,
        },
    })
}

/// All printings of a card, ordered by set then collector number.
pub fn printings_for_card(
    conn: &Connection,
    card_id: i64,
) -> Result<Vec<CardPrinting>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, card_id, set_id, collector_number, collector_letter, rarity_id,
                flavor_text, artist, original_text, original_type
         FROM card_printings WHERE card_id = ?1
         ORDER BY set_id, collector_number, collector_letter",
    )?;
    let rows = stmt.query_map(params![card_id], |row| {
        Ok(CardPrinting {
            id: row.get(0)?,
            card_id: row.get(1)?,
            set_id: row.get(2)?,
            collector_number: row.get(3)?,
            collector_letter: row.get(4)?,
            rarity_id: row.get(5)?,
            flavor_text: row.get(6)?,
            artist: row.get(7)?,
            original_text: row.get(8)?,
            original_type: row.get(9)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn languages_for_printing(
    conn: &Connection,
    card_printing_id: i64,
) -> Result<Vec<CardPrintingLanguage>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, card_printing_id, language_id, card_name, multiverse_id
         FROM card_printing_languages WHERE card_printing_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![card_printing_id], |row| {
        Ok(CardPrintingLanguage {
            id: row.get(0)?,
            card_printing_id: row.get(1)?,
            language_id: row.get(2)?,
            card_name: row.get(3)?,
            multiverse_id: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Physical Cards ──────────────────────────────────────────────────────────

/// A localized printing that a physical card could link to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub card_printing_language_id: i64,
    pub collector_number: u32,
    pub collector_letter: Option<String>,
}

/// Localized printings of the card named `card_name` in one set and language.
pub fn printing_language_candidates(
    conn: &Connection,
    card_name: &str,
    set_id: i64,
    language_id: i64,
) -> Result<Vec<LinkCandidate>, OperationError> {
    let mut stmt = conn.prepare_cached(
        "SELECT cpl.id, cp.collector_number, cp.collector_letter
         FROM card_printing_languages cpl
         JOIN card_printings cp ON cp.id = cpl.card_printing_id
         JOIN cards c ON c.id = cp.card_id
         WHERE c.name = ?1 AND cp.set_id = ?2 AND cpl.language_id = ?3
         ORDER BY cpl.id",
    )?;
    let rows = stmt.query_map(params![card_name, set_id, language_id], |row| {
        Ok(LinkCandidate {
            card_printing_language_id: row.get(0)?,
            collector_number: row.get(1)?,
            collector_letter: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn physical_cards_for_printing_language(
    conn: &Connection,
    card_printing_language_id: i64,
) -> Result<Vec<PhysicalCard>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT pc.id, pc.layout
         FROM physical_cards pc
         JOIN physical_card_links l ON l.physical_card_id = pc.id
         WHERE l.card_printing_language_id = ?1
         ORDER BY pc.id",
    )?;
    let rows = stmt.query_map(params![card_printing_language_id], |row| {
        Ok(PhysicalCard {
            id: row.get(0)?,
            layout: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Localized printing ids linked to a physical card, ascending.
pub fn physical_card_members(
    conn: &Connection,
    physical_card_id: i64,
) -> Result<Vec<i64>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT card_printing_language_id FROM physical_card_links
         WHERE physical_card_id = ?1 ORDER BY card_printing_language_id",
    )?;
    let rows = stmt.query_map(params![physical_card_id], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Rulings ─────────────────────────────────────────────────────────────────

pub fn rulings_for_card(conn: &Connection, card_id: i64) -> Result<Vec<CardRuling>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, card_id, date, text FROM card_rulings
         WHERE card_id = ?1 ORDER BY date, text",
    )?;
    let rows = stmt.query_map(params![card_id], |row| {
        Ok(CardRuling {
            id: row.get(0)?,
            card_id: row.get(1)?,
            date: row.get(2)?,
            text: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Images ──────────────────────────────────────────────────────────────────

/// Every distinct external image id, ascending.
pub fn list_multiverse_ids(conn: &Connection) -> Result<Vec<i64>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT multiverse_id FROM card_printing_languages
         WHERE multiverse_id IS NOT NULL ORDER BY multiverse_id",
    )?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Import Logs ─────────────────────────────────────────────────────────────

/// Most recent import runs first.
pub fn list_import_logs(conn: &Connection, limit: usize) -> Result<Vec<ImportLog>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, source_name, imported_at, records_created, records_updated,
                records_unchanged, links_skipped
         FROM import_log ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            source_name: row.get(1)?,
            imported_at: row.get(2)?,
            records_created: row.get(3)?,
            records_updated: row.get(4)?,
            records_unchanged: row.get(5)?,
            links_skipped: row.get(6)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
