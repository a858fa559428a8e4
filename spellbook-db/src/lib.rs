//! SQLite persistence layer for the card catalog.
//!
//! Provides schema creation, natural-key resolution, insert/update
//! primitives, and read queries backed by SQLite (via rusqlite with the
//! bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use rusqlite::Connection;

pub use operations::{
    OperationError, SeedStats, clear_rulings, find_block, find_card, find_language,
    find_physical_card_link, find_printing, find_printing_language, find_rarity, find_set,
    insert_card, insert_import_log, insert_physical_card, insert_physical_card_link,
    insert_printing, insert_printing_language, insert_ruling, printing_language_has_link,
    seed_reference_data, update_card, update_printing, upsert_block, upsert_set,
};
pub use queries::{
    CatalogStats, LinkCandidate, catalog_stats, find_card_by_name, get_block_by_name,
    get_set_by_code, languages_for_printing, list_import_logs, list_multiverse_ids,
    physical_card_members, physical_cards_for_printing_language, printing_language_candidates,
    printings_for_card, rulings_for_card,
};
pub use schema::{SchemaError, get_schema_version, open_database, open_memory};
