use std::path::PathBuf;
use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use spellbook_lib::{HttpImageSource, Settings, download_images};

use super::open_catalog;
use crate::CliError;

/// Download the image for every multiverse id in the catalog.
pub(crate) fn run_images(
    settings: &Settings,
    dir: Option<PathBuf>,
    workers: Option<usize>,
) -> Result<(), CliError> {
    let dir = dir.unwrap_or_else(|| settings.image_dir.clone());
    let workers = workers.unwrap_or(settings.image_workers);

    let conn = open_catalog(&settings.database)?;
    let ids = spellbook_db::list_multiverse_ids(&conn)
        .map_err(|e| CliError::database(format!("Failed to list image ids: {}", e)))?;

    if ids.is_empty() {
        log::warn!("No multiverse ids in the catalog. Run 'spellbook import' first.");
        return Ok(());
    }

    let source = HttpImageSource::new(settings.image_url_template.clone())
        .map_err(|e| CliError::config(e.to_string()))?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;
    let stats = rt
        .block_on(download_images(Arc::new(source), &ids, &dir, workers))
        .map_err(|e| CliError::runtime(e.to_string()))?;

    log::info!(
        "  {} {} downloaded, {} already present, {} failed ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.downloaded,
        stats.skipped,
        stats.failed,
        dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
