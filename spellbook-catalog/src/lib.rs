//! Card catalog data model, source document types, and field extraction.
//!
//! This crate has no database dependencies. It describes what the upstream
//! JSON document looks like, what the normalized rows look like, and how one
//! raw card record is turned into the attribute bundles that `spellbook-db`
//! persists.

pub mod fields;
pub mod reference;
pub mod source;
pub mod types;

pub use fields::{
    Color, FieldError, MeldRole, color_count, color_mask, combined_subtypes, combined_types,
    effective_layout, extract_card, extract_printing, meld_role, parse_leading_number,
    resolve_rarity, split_collector_number,
};
pub use reference::{ENGLISH, LANGUAGES, Language, RARITIES, Rarity, TIMESHIFTED};
pub use source::{
    CardRecord, ForeignName, SourceDocument, SourceError, SourceRuling, SourceSet, load_document,
};
pub use types::*;
