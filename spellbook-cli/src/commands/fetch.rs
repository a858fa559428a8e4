use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use spellbook_lib::Settings;

use crate::CliError;

/// Download and extract the source archive into the data directory.
pub(crate) fn run_fetch(
    settings: &Settings,
    url: Option<String>,
    force: bool,
) -> Result<(), CliError> {
    let url = url.as_deref().unwrap_or(&settings.source_url);
    let path = fetch_source(settings, url, force)?;

    log::info!(
        "  {} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

pub(crate) fn fetch_source(
    settings: &Settings,
    url: &str,
    force: bool,
) -> Result<PathBuf, CliError> {
    spellbook_lib::fetch_archive(url, &settings.data_dir, force)
        .map_err(|e| CliError::document(format!("Failed to fetch {url}: {e}")))
}
