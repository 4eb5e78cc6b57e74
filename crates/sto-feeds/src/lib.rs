//! sto-feeds — record sources for sto-cargo-search.
//!
//! Every source produces plain [`sto_core::Record`] lists:
//!
//! - [`cargo_export`]: pages through the wiki's CargoExport endpoint.
//! - [`cache`]: one JSON file per category, validated by age.
//! - [`downloader`]: refreshes stale cache files from the remote endpoint.
//! - [`file`]: an explicit JSON file given on the command line.

pub mod cache;
pub mod cargo_export;
pub mod downloader;
pub mod file;

pub use cache::{Cache, CacheError};
pub use cargo_export::{CargoClient, FetchError};
pub use downloader::{DownloadError, Downloader, Refresh};
pub use file::{load_records, FileError};

use serde_json::Value;
use sto_core::Record;

/// Convert a decoded JSON document into records. Returns `None` unless the
/// top level is an array whose elements are all objects.
pub fn records_from_json(value: Value) -> Option<Vec<Record>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(fields) => Some(Record::from(fields)),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}
