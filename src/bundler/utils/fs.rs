//! File system helpers for the pipeline.

use crate::bundler::error::{ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Creates `path` and its parents. Succeeds if it already exists.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Whether `path` exists and is a regular file.
pub async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Size of a regular file in bytes.
pub async fn file_size(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)
        .await
        .fs_context("reading artifact metadata", path)?
        .len())
}

/// Absolute form of `path` without touching the filesystem.
///
/// Falls back to the path as given if the working directory is unavailable.
pub fn absolute(path: &Path) -> PathBuf {
    match path.absolutize() {
        Ok(abs) => abs.into_owned(),
        Err(e) => {
            log::debug!("Could not absolutize {}: {e}", path.display());
            path.to_path_buf()
        }
    }
}

/// Writes `contents` to `path`, creating parent directories as needed.
pub async fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).await?;
    }
    fs::write(path, contents)
        .await
        .fs_context("writing file", path)
}

/// Human readable byte count.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
