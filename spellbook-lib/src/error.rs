use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("No JSON entry in archive {}", path.display())]
    MissingEntry { path: PathBuf },

    #[error("Invalid settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Could not serialize settings: {0}")]
    SettingsWrite(#[from] toml::ser::Error),
}
