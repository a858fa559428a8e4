//! Reconcile the source document into the catalog database.
//!
//! This crate owns all ETL logic: resolving each card record's card,
//! printing, and localized printings against what the store already holds,
//! grouping localized printings into physical cards, and rebuilding rulings.
//! Every step is resolve-or-create, update-in-place, or insert-if-absent, so
//! re-running an import converges instead of duplicating.

pub mod card_import;
pub mod driver;
pub mod error;
pub mod physical;
pub mod progress;
pub mod rulings;

pub use card_import::{
    Outcome, PhysicalCandidate, SetContext, ensure_printing_language, import_card,
    upsert_card, upsert_printing,
};
pub use driver::{ImportOptions, ImportStats, import_document, import_sets, log_import};
pub use error::ImportError;
pub use physical::{link_physical_card, link_physical_cards};
pub use progress::{ImportPhase, ImportProgress, LogProgress, SilentProgress};
pub use rulings::rebuild_rulings;
