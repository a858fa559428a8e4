//! Services shared by the spellbook frontends: the settings file, fetching
//! the source archive, and bulk card image downloads.

pub mod archive;
pub mod error;
pub mod images;
pub mod settings;
pub mod worker_pool;

pub use archive::{extract_json, fetch_archive};
pub use error::LibError;
pub use images::{DownloadStats, HttpImageSource, ImageSource, download_images, image_path};
pub use settings::{Settings, settings_path};
pub use worker_pool::WorkerPool;
