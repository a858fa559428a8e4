use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use spellbook_import::{ImportOptions, ImportStats, LogProgress, import_document, log_import};
use spellbook_lib::Settings;

use super::fetch::fetch_source;
use super::open_catalog;
use crate::CliError;

/// Import the source document into the catalog database.
pub(crate) fn run_import(
    settings: &Settings,
    file: Option<PathBuf>,
    download: bool,
    set_codes: Vec<String>,
    link_physical_cards: bool,
    rebuild_rulings: bool,
) -> Result<(), CliError> {
    let path = match file {
        Some(path) => path,
        None => fetch_source(settings, &settings.source_url, download)?,
    };

    log::info!("Reading {}", path.display());
    let document = spellbook_catalog::load_document(&path)
        .map_err(|e| CliError::document(e.to_string()))?;

    let conn = open_catalog(&settings.database)?;

    log::info!(
        "{}",
        format!(
            "Importing {} sets ({} card records) into {}",
            document.sets.len(),
            document.card_count(),
            settings.database.display()
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );

    let options = ImportOptions {
        set_codes,
        link_physical_cards,
        rebuild_rulings,
    };
    let stats = import_document(&conn, &document, &options, Some(&LogProgress))
        .map_err(|e| CliError::import(e.to_string()))?;

    let source_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    if let Err(e) = log_import(&conn, &source_name, &stats) {
        log::warn!("Failed to log import: {}", e);
    }

    print_summary(&stats);
    Ok(())
}

fn print_summary(stats: &ImportStats) {
    crate::log_blank();
    log::info!(
        "{}",
        "Import complete".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  Sets:            {} ({} with a block)",
        stats.sets_imported,
        stats.blocks_seen,
    );
    log::info!(
        "  Cards:           {} new, {} updated",
        stats.cards_created,
        stats.cards_updated,
    );
    log::info!(
        "  Printings:       {} new, {} updated",
        stats.printings_created,
        stats.printings_updated,
    );
    log::info!(
        "  Localized:       {} new, {} existing",
        stats.languages_created,
        stats.languages_existing,
    );
    log::info!(
        "  Physical cards:  {} new ({} links), {} existing, {} meld backs deferred",
        stats.physical_cards_created,
        stats.physical_links_created,
        stats.physical_existing,
        stats.meld_backs_deferred,
    );
    log::info!(
        "  Rulings:         {} inserted, {} duplicates collapsed",
        stats.rulings_inserted,
        stats.rulings_duplicate,
    );
    if stats.links_skipped > 0 {
        log::warn!(
            "  {} {} alternate names could not be linked",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.links_skipped,
        );
    }
}
