//! Download and unpack the zipped source document.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::LibError;

/// Make sure the source JSON is present in `data_dir`, downloading it if
/// needed, and return its path.
///
/// The JSON file is named after the archive with the `.zip` extension
/// dropped (`AllSets-x.json.zip` becomes `AllSets-x.json`). When it already
/// exists the download is skipped unless `force` is set.
pub fn fetch_archive(url: &str, data_dir: &Path, force: bool) -> Result<PathBuf, LibError> {
    let archive_name = url.rsplit('/').next().unwrap_or(url);
    let archive_path = data_dir.join(archive_name);
    let json_path = data_dir.join(archive_name.strip_suffix(".zip").unwrap_or(archive_name));

    if json_path.exists() && !force {
        log::info!("Using existing {}", json_path.display());
        return Ok(json_path);
    }

    fs::create_dir_all(data_dir)?;

    log::info!("Downloading {url}");
    let response = reqwest::blocking::get(url)?;
    if !response.status().is_success() {
        return Err(LibError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    let bytes = response.bytes()?;
    fs::write(&archive_path, &bytes)?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), archive_path.display());

    extract_json(&archive_path, &json_path)?;
    Ok(json_path)
}

/// Extract the first `.json` entry of a zip archive to `dest`.
pub fn extract_json(archive_path: &Path, dest: &Path) -> Result<(), LibError> {
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if !entry.is_file() || !entry.name().ends_with(".json") {
            continue;
        }

        log::info!("Extracting {} to {}", entry.name(), dest.display());
        let tmp = dest.with_extension("json.tmp");
        let mut out = File::create(&tmp)?;
        io::copy(&mut entry, &mut out)?;
        drop(out);
        fs::rename(&tmp, dest)?;
        return Ok(());
    }

    Err(LibError::MissingEntry {
        path: archive_path.to_path_buf(),
    })
}
