use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use spellbook_lib::Settings;

use super::open_catalog;
use crate::CliError;

pub(crate) fn run_stats(settings: &Settings, recent_imports: usize) -> Result<(), CliError> {
    let db_path = &settings.database;
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'spellbook import' to create one.");
        return Ok(());
    }

    let conn = open_catalog(db_path)?;
    let stats = spellbook_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Blocks:              {:>8}", stats.blocks);
    log::info!("  Sets:                {:>8}", stats.sets);
    log::info!("  Cards:               {:>8}", stats.cards);
    log::info!("  Printings:           {:>8}", stats.printings);
    log::info!("  Localized printings: {:>8}", stats.printing_languages);
    log::info!("  Physical cards:      {:>8}", stats.physical_cards);
    log::info!("  Physical card links: {:>8}", stats.physical_card_links);
    log::info!("  Rulings:             {:>8}", stats.rulings);

    if recent_imports == 0 {
        return Ok(());
    }
    let logs = spellbook_db::list_import_logs(&conn, recent_imports)
        .map_err(|e| CliError::database(format!("Failed to read import log: {}", e)))?;
    if logs.is_empty() {
        return Ok(());
    }

    crate::log_blank();
    log::info!("{}", "Recent imports".if_supports_color(Stdout, |t| t.bold()));
    for entry in logs {
        log::info!(
            "  {}  {}: {} created, {} updated, {} unchanged, {} links skipped",
            entry.imported_at.if_supports_color(Stdout, |t| t.dimmed()),
            entry.source_name,
            entry.records_created,
            entry.records_updated,
            entry.records_unchanged,
            entry.links_skipped,
        );
    }
    Ok(())
}
