use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use spellbook_lib::{Settings, settings_path};

use crate::CliError;

/// Show the effective settings, after command-line overrides.
pub(crate) fn run_config_show(settings: &Settings) -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "spellbook Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let toml = settings
        .to_toml()
        .map_err(|e| CliError::config(e.to_string()))?;
    for line in toml.lines() {
        log::info!("  {}", line);
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings_path().display());
    Ok(())
}
