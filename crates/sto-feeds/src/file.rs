//! Explicit JSON file source (`--file`).
//!
//! The file must hold a JSON array of flat objects, the same shape as a
//! cache file.

use std::path::{Path, PathBuf};

use sto_core::Record;

use crate::records_from_json;

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error loading JSON from {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON data in {0} must be a list of objects")]
    NotAList(PathBuf),
}

/// Load every record from `path`.
pub fn load_records(path: &Path) -> Result<Vec<Record>, FileError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            FileError::NotFound(path.to_path_buf())
        } else {
            FileError::Io { path: path.to_path_buf(), source }
        }
    })?;

    let value: serde_json::Value = serde_json::from_str(&text).map_err(|source| FileError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let records = records_from_json(value).ok_or_else(|| FileError::NotAList(path.to_path_buf()))?;
    tracing::debug!(path = %path.display(), count = records.len(), "file: records loaded");
    Ok(records)
}
