use spellbook_catalog::FieldError;
use spellbook_db::OperationError;
use thiserror::Error;

/// Errors that abort an import run.
///
/// Every variant is fatal: later phases assume earlier ones completed, so a
/// defect in one record stops the whole run rather than skipping the record.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Card '{card}' in set {set}: {source}")]
    Field {
        card: String,
        set: String,
        source: FieldError,
    },

    #[error("Card '{card}' in set {set}: unknown rarity '{rarity}'")]
    UnknownRarity {
        card: String,
        set: String,
        rarity: String,
    },

    #[error("Card '{card}' in set {set}: unknown language '{language}'")]
    UnknownLanguage {
        card: String,
        set: String,
        language: String,
    },

    #[error("No {entity_type} found for '{key}'")]
    MissingReference { entity_type: &'static str, key: String },
}

impl ImportError {
    pub(crate) fn field(card: &str, set: &str, source: FieldError) -> Self {
        Self::Field {
            card: card.to_string(),
            set: set.to_string(),
            source,
        }
    }

    pub(crate) fn missing(entity_type: &'static str, key: impl Into<String>) -> Self {
        Self::MissingReference {
            entity_type,
            key: key.into(),
        }
    }
}
