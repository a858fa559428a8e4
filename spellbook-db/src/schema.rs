//! SQLite schema creation and versioning.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Schema version mismatch: expected at most {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables and indexes if they don't exist.
///
/// This is idempotent; safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a catalog database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

// Reconciled tables carry no timestamps: re-importing the same document must
// leave every row unchanged.
//
// Printings with no collector letter must collide with each other but with
// no lettered printing, so the natural-key index folds NULL to ''. The
// extractor never produces an empty letter.
const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Static reference data
CREATE TABLE IF NOT EXISTS rarities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    symbol TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL UNIQUE,
    display_order INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS languages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    code TEXT NOT NULL
);

-- Sets and blocks
CREATE TABLE IF NOT EXISTS blocks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    release_date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    release_date TEXT NOT NULL,
    block_id INTEGER REFERENCES blocks(id),
    magic_cards_info_code TEXT
);

-- One row per distinct card name
CREATE TABLE IF NOT EXISTS cards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    mana_cost TEXT,
    cmc REAL NOT NULL DEFAULT 0,
    colors INTEGER NOT NULL DEFAULT 0,
    color_identity INTEGER NOT NULL DEFAULT 0,
    num_colors INTEGER NOT NULL DEFAULT 0,
    type TEXT NOT NULL DEFAULT '',
    subtype TEXT NOT NULL DEFAULT '',
    power TEXT,
    num_power REAL NOT NULL DEFAULT 0,
    toughness TEXT,
    num_toughness REAL NOT NULL DEFAULT 0,
    loyalty TEXT,
    num_loyalty REAL NOT NULL DEFAULT 0,
    rules_text TEXT,
    layout TEXT NOT NULL DEFAULT 'normal'
);

-- One appearance of a card in a set
CREATE TABLE IF NOT EXISTS card_printings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    card_id INTEGER NOT NULL REFERENCES cards(id),
    set_id INTEGER NOT NULL REFERENCES sets(id),
    collector_number INTEGER NOT NULL,
    collector_letter TEXT,
    rarity_id INTEGER NOT NULL REFERENCES rarities(id),
    flavor_text TEXT,
    artist TEXT NOT NULL,
    original_text TEXT,
    original_type TEXT
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_card_printings_natural
    ON card_printings(card_id, set_id, collector_number, IFNULL(collector_letter, ''));
CREATE INDEX IF NOT EXISTS idx_card_printings_set ON card_printings(set_id);

-- Localized variant of a printing
CREATE TABLE IF NOT EXISTS card_printing_languages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    card_printing_id INTEGER NOT NULL REFERENCES card_printings(id),
    language_id INTEGER NOT NULL REFERENCES languages(id),
    card_name TEXT NOT NULL,
    multiverse_id INTEGER,
    UNIQUE(card_printing_id, language_id)
);
CREATE INDEX IF NOT EXISTS idx_card_printing_languages_name ON card_printing_languages(card_name);

-- Rulings are rebuilt from scratch each import; without AUTOINCREMENT the
-- ids restart at 1 after each truncate.
CREATE TABLE IF NOT EXISTS card_rulings (
    id INTEGER PRIMARY KEY,
    card_id INTEGER NOT NULL REFERENCES cards(id),
    date TEXT NOT NULL,
    text TEXT NOT NULL,
    UNIQUE(date, text, card_id)
);

-- Real-world printed objects and the localized printings on them
CREATE TABLE IF NOT EXISTS physical_cards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    layout TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS physical_card_links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    physical_card_id INTEGER NOT NULL REFERENCES physical_cards(id),
    card_printing_language_id INTEGER NOT NULL REFERENCES card_printing_languages(id),
    UNIQUE(physical_card_id, card_printing_language_id)
);
CREATE INDEX IF NOT EXISTS idx_physical_card_links_language
    ON physical_card_links(card_printing_language_id);

-- Import tracking
CREATE TABLE IF NOT EXISTS import_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_name TEXT NOT NULL,
    imported_at TEXT NOT NULL,
    records_created INTEGER DEFAULT 0,
    records_updated INTEGER DEFAULT 0,
    records_unchanged INTEGER DEFAULT 0,
    links_skipped INTEGER DEFAULT 0
);
"#;
