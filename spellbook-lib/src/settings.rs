//! Application settings file.
//!
//! Settings live in `~/.config/spellbook/settings.toml` (or the platform's
//! config directory). Every key is optional; anything missing falls back to
//! [`Settings::default`], and command-line flags override both.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LibError;

/// Where the source archive is published.
pub const DEFAULT_SOURCE_URL: &str = "https://mtgjson.com/json/AllSets-x.json.zip";

/// Card image URL; `{id}` is replaced by the multiverse id.
pub const DEFAULT_IMAGE_URL_TEMPLATE: &str =
    "https://gatherer.wizards.com/Handlers/Image.ashx?multiverseid={id}&type=card";

pub const DEFAULT_IMAGE_WORKERS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite catalog database.
    pub database: PathBuf,
    /// Where the downloaded archive and extracted JSON are kept.
    pub data_dir: PathBuf,
    pub image_dir: PathBuf,
    pub source_url: String,
    pub image_url_template: String,
    pub image_workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let base = data_root();
        Self {
            database: base.join("spellbook.db"),
            data_dir: base.join("data"),
            image_dir: base.join("images"),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            image_url_template: DEFAULT_IMAGE_URL_TEMPLATE.to_string(),
            image_workers: DEFAULT_IMAGE_WORKERS,
        }
    }
}

/// Canonical path to the settings file: `~/.config/spellbook/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("spellbook").join("settings.toml")
}

fn data_root() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("spellbook")
}

impl Settings {
    /// Load the settings file from its canonical location.
    pub fn load() -> Result<Self, LibError> {
        Self::load_from(&settings_path())
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, LibError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|source| LibError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), LibError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = self.to_toml()?;
        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, LibError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
