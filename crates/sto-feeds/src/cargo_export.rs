//! CargoExport client — paginated download of one category.
//!
//! Each category is fetched with GET requests against the configured export
//! URL, carrying the parameters from [`CargoQuery::params`]. Pages are
//! requested at offsets `0, limit, 2 * limit, ...` until a page comes back
//! empty or shorter than `limit`. A fixed delay separates successive pages.
//!
//! Any failed page aborts the whole category: nothing fetched so far is
//! returned.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use sto_core::config::{CargoQuery, WikiConfig};
use sto_core::{Category, Record};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("category {0} has no CargoExport table")]
    NoQuery(Category),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to download {category} at offset {offset}: {source}")]
    Transport {
        category: Category,
        offset: usize,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to download {category} at offset {offset}: server returned {status}")]
    Status {
        category: Category,
        offset: usize,
        status: StatusCode,
    },
    #[error("failed to decode {category} page at offset {offset}: {source}")]
    Decode {
        category: Category,
        offset: usize,
        #[source]
        source: reqwest::Error,
    },
}

/// HTTP client for the CargoExport endpoint.
#[derive(Debug, Clone)]
pub struct CargoClient {
    http: Client,
    export_url: String,
    page_delay: Duration,
}

impl CargoClient {
    /// Build a client from the `[wiki]` config section.
    pub fn new(wiki: &WikiConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(wiki.user_agent.clone())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            http,
            export_url: wiki.export_url.clone(),
            page_delay: wiki.page_delay(),
        })
    }

    /// Client against an arbitrary endpoint with a default HTTP client.
    pub fn with_endpoint(export_url: impl Into<String>, page_delay: Duration) -> Self {
        Self {
            http: Client::new(),
            export_url: export_url.into(),
            page_delay,
        }
    }

    /// Fetch one page of `category` starting at `offset`.
    pub async fn fetch_page(&self, category: Category, offset: usize) -> Result<Vec<Record>, FetchError> {
        let query = CargoQuery::for_category(category).ok_or(FetchError::NoQuery(category))?;

        tracing::debug!(%category, offset, limit = query.limit, "cargo: requesting page");
        let response = self
            .http
            .get(&self.export_url)
            .query(&query.params(offset))
            .send()
            .await
            .map_err(|source| FetchError::Transport { category, offset, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { category, offset, status });
        }

        response
            .json::<Vec<Record>>()
            .await
            .map_err(|source| FetchError::Decode { category, offset, source })
    }

    /// Fetch every page of `category`.
    pub async fn fetch_all(&self, category: Category) -> Result<Vec<Record>, FetchError> {
        let query = CargoQuery::for_category(category).ok_or(FetchError::NoQuery(category))?;
        let mut records = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_page(category, offset).await?;
            let page_len = page.len();
            records.extend(page);

            if page_len < query.limit {
                break;
            }

            offset += query.limit;
            tokio::time::sleep(self.page_delay).await;
        }

        tracing::info!(%category, count = records.len(), "cargo: download finished");
        Ok(records)
    }
}
