//! Bulk card image download.
//!
//! Images are stored flat as `<dir>/<multiverse id>.jpg`. An id whose file
//! already exists is skipped, so an interrupted download can be resumed by
//! running it again.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::LibError;
use crate::worker_pool::WorkerPool;

/// Something that can produce the image bytes for a multiverse id.
pub trait ImageSource: Send + Sync + 'static {
    fn fetch(&self, multiverse_id: i64) -> impl Future<Output = Result<Vec<u8>, LibError>> + Send;
}

/// Fetches images over HTTP from a URL template containing `{id}`.
pub struct HttpImageSource {
    client: reqwest::Client,
    url_template: String,
}

impl HttpImageSource {
    pub fn new(url_template: impl Into<String>) -> Result<Self, LibError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("spellbook/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            url_template: url_template.into(),
        })
    }

    pub fn url_for(&self, multiverse_id: i64) -> String {
        self.url_template.replace("{id}", &multiverse_id.to_string())
    }
}

impl ImageSource for HttpImageSource {
    async fn fetch(&self, multiverse_id: i64) -> Result<Vec<u8>, LibError> {
        let url = self.url_for(multiverse_id);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LibError::Status {
                url,
                status: response.status().as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Outcome counts for one download run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadStats {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Target file for an image.
pub fn image_path(dir: &Path, multiverse_id: i64) -> PathBuf {
    dir.join(format!("{multiverse_id}.jpg"))
}

/// Download every image in `ids` that isn't already in `dir`.
///
/// Fetches run on `workers` concurrent tasks. A failed fetch or write is
/// logged and counted; only failing to create `dir` is an error.
pub async fn download_images<S: ImageSource>(
    source: Arc<S>,
    ids: &[i64],
    dir: &Path,
    workers: usize,
) -> Result<DownloadStats, LibError> {
    tokio::fs::create_dir_all(dir).await?;

    let mut stats = DownloadStats::default();
    let mut pending = Vec::new();
    for &id in ids {
        if image_path(dir, id).exists() {
            stats.skipped += 1;
        } else {
            pending.push(id);
        }
    }

    if pending.is_empty() {
        return Ok(stats);
    }
    log::info!(
        "Downloading {} images ({} already present)",
        pending.len(),
        stats.skipped
    );

    let total = pending.len();
    let dir = dir.to_path_buf();
    let mut pool = WorkerPool::start(workers, pending, move |id| {
        let source = Arc::clone(&source);
        let path = image_path(&dir, id);
        async move {
            let result = match source.fetch(id).await {
                Ok(bytes) => tokio::fs::write(&path, bytes).await.map_err(LibError::from),
                Err(e) => Err(e),
            };
            (id, result)
        }
    });

    let mut finished = 0;
    while let Some((id, result)) = pool.recv().await {
        finished += 1;
        match result {
            Ok(()) => {
                stats.downloaded += 1;
                log::debug!("[{finished}/{total}] {id}");
            }
            Err(e) => {
                stats.failed += 1;
                log::warn!("Failed to download image {id}: {e}");
            }
        }
    }

    // Items dropped by the pool's timeout never report back.
    stats.failed += total - finished;

    Ok(stats)
}
