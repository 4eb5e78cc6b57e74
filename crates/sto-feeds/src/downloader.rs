//! Downloader — keeps the cache in step with the remote export.
//!
//! A category is refreshed when its cache file is stale or missing, or
//! unconditionally when forced. The cache file is only replaced after every
//! page of the category has been fetched; a failed download leaves the old
//! file (if any) untouched.

use sto_core::Category;

use crate::cache::{Cache, CacheError};
use crate::cargo_export::{CargoClient, FetchError};

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Outcome of refreshing one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The cache file was fresh and nothing was fetched.
    Fresh,
    /// The category was downloaded and stored; holds the record count.
    Downloaded(usize),
}

pub struct Downloader {
    client: CargoClient,
    cache: Cache,
    force: bool,
}

impl Downloader {
    pub fn new(client: CargoClient, cache: Cache, force: bool) -> Self {
        Self { client, cache, force }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Whether [`refresh`](Self::refresh) would hit the network.
    pub fn needs_refresh(&self, category: Category) -> bool {
        self.force || !self.cache.is_fresh(category)
    }

    /// Fetch `category` and replace its cache file.
    pub async fn download(&self, category: Category) -> Result<usize, DownloadError> {
        let records = self.client.fetch_all(category).await?;
        self.cache.store(category, &records)?;
        Ok(records.len())
    }

    /// Download `category` unless its cache file is still fresh.
    pub async fn refresh(&self, category: Category) -> Result<Refresh, DownloadError> {
        if !self.needs_refresh(category) {
            tracing::debug!(%category, "download: cache is fresh");
            return Ok(Refresh::Fresh);
        }
        self.download(category).await.map(Refresh::Downloaded)
    }
}
