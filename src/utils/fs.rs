//! Filesystem helpers
//!
//! UTF-8 text reads, pretty-printed JSON writes, and sorted directory listing

use crate::utils::error::{AppError, AppResult};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a UTF-8 text file
pub fn read_text(path: impl AsRef<Path>) -> AppResult<String> {
    let path = path.as_ref();
    debug!("Reading file: {}", path.display());
    std::fs::read_to_string(path).map_err(|e| AppError::file(path.display(), e))
}

/// Write a value as pretty-printed UTF-8 JSON
///
/// serde_json writes non-ASCII characters verbatim, so Hebrew text stays
/// readable in the persisted files.
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> AppResult<()> {
    let path = path.as_ref();
    debug!("Writing to file: {}", path.display());
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| AppError::file(path.display(), e))
}

/// List the files in `dir` with the given extension, sorted lexicographically
pub fn list_files_with_extension(dir: impl AsRef<Path>, extension: &str) -> AppResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| AppError::file(dir.display(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AppError::file(dir.display(), e))?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(OsStr::to_str) == Some(extension) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
