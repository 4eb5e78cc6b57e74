//! On-disk cache — one `<category>.json` file per category.
//!
//! A cache file is fresh while its modification time is within the
//! configured maximum age. Files are written through a temporary file in the
//! same directory that is then renamed over the target, so readers never see
//! a partially written cache.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use sto_core::{Category, Record};
use tempfile::NamedTempFile;

use crate::records_from_json;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed cache file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cache file {0} is not a list of objects")]
    NotAList(PathBuf),
}

/// Directory of per-category cache files.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
    max_age: Duration,
}

impl Cache {
    /// Open (creating if needed) the cache directory.
    pub fn open(dir: impl Into<PathBuf>, max_age: Duration) -> Result<Self, CacheError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| CacheError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir, max_age })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, category: Category) -> PathBuf {
        self.dir.join(format!("{}.json", category.as_str()))
    }

    /// Whether the category's file exists and is younger than the maximum age.
    pub fn is_fresh(&self, category: Category) -> bool {
        let path = self.path(category);
        let Ok(modified) = std::fs::metadata(&path).and_then(|m| m.modified()) else {
            return false;
        };
        // A cutoff outside chrono's range predates every file.
        let Some(cutoff) = chrono::Duration::from_std(self.max_age)
            .ok()
            .and_then(|max_age| Utc::now().checked_sub_signed(max_age))
        else {
            return true;
        };
        let modified: DateTime<Utc> = modified.into();
        let fresh = modified > cutoff;
        tracing::debug!(%category, %modified, fresh, "cache: freshness checked");
        fresh
    }

    /// Read a category's records. `Ok(None)` when no file exists.
    pub fn load(&self, category: Category) -> Result<Option<Vec<Record>>, CacheError> {
        let path = self.path(category);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(CacheError::Io { path, source }),
        };
        let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| CacheError::Json { path: path.clone(), source })?;
        records_from_json(value)
            .map(Some)
            .ok_or(CacheError::NotAList(path))
    }

    /// Replace a category's file with `records`, pretty-printed.
    pub fn store(&self, category: Category, records: &[Record]) -> Result<(), CacheError> {
        let path = self.path(category);
        let io_err = |source| CacheError::Io { path: path.clone(), source };

        let tmp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, records)
                .map_err(|source| CacheError::Json { path: path.clone(), source })?;
            writer.flush().map_err(io_err)?;
        }
        tmp.persist(&path).map_err(|e| io_err(e.error))?;

        tracing::debug!(%category, count = records.len(), path = %path.display(), "cache: stored");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
