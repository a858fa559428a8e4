pub(crate) mod config;
pub(crate) mod fetch;
pub(crate) mod images;
pub(crate) mod import;
pub(crate) mod stats;

use std::path::Path;

use crate::CliError;

/// Open (creating if needed) the catalog database.
fn open_catalog(path: &Path) -> Result<spellbook_db::Connection, CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    spellbook_db::open_database(path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database at {}: {}",
            path.display(),
            e
        ))
    })
}
