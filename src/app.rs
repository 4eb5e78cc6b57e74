//! Pipeline driver: refresh the cache, select records, aggregate.
//!
//! Progress lines go to stderr; the caller renders the returned
//! [`ResultSet`] to stdout.

use std::path::Path;

use anyhow::{bail, Context};
use sto_core::config::{expand_tilde, Config};
use sto_core::{classify, compile, Category, Expr, ResultSet};
use sto_feeds::{load_records, Cache, CargoClient, Downloader, Refresh};

use crate::cli::{Plan, Query};

/// Execute `plan`. A download-only plan returns an empty result set.
pub async fn run(plan: &Plan, config: &Config) -> anyhow::Result<ResultSet> {
    // A bad expression must fail before anything touches the network.
    let expr = match &plan.query {
        Query::Search(text) => Some(compile(text)?),
        Query::ListAll | Query::DownloadOnly => None,
    };

    for name in &plan.ignored_types {
        tracing::warn!(search_type = %name, "cli: ignoring unknown search type");
    }

    let downloader = if plan.file.is_none() || plan.force_download {
        let downloader = open_downloader(plan, config)?;
        refresh_all(&downloader).await;
        Some(downloader)
    } else {
        None
    };

    if plan.query == Query::DownloadOnly {
        eprintln!("Download complete.");
        return Ok(ResultSet::new());
    }

    let mut results = ResultSet::new();
    if let Some(path) = &plan.file {
        collect_file(path, plan, expr.as_ref(), &mut results)?;
    } else if let Some(downloader) = &downloader {
        collect_cached(downloader.cache(), &plan.categories, expr.as_ref(), &mut results);
    }

    tracing::debug!(total = results.total(), "app: search finished");
    Ok(results)
}

fn open_downloader(plan: &Plan, config: &Config) -> anyhow::Result<Downloader> {
    let dir = match &plan.cache_dir {
        Some(dir) => expand_tilde(dir),
        None => config.cache.resolved_dir(),
    };
    let cache = Cache::open(&dir, config.cache.max_age())
        .with_context(|| format!("cannot use cache directory {}", dir.display()))?;
    eprintln!("Using cache directory: {}\n", cache.dir().display());

    let client = CargoClient::new(&config.wiki)?;
    Ok(Downloader::new(client, cache, plan.force_download))
}

/// Refresh every known category. One category failing does not stop the
/// others; its previous cache file (if any) stays in place.
async fn refresh_all(downloader: &Downloader) {
    for category in Category::KNOWN {
        if downloader.needs_refresh(category) {
            eprintln!("Downloading {category} data...");
        }
        match downloader.refresh(category).await {
            Ok(Refresh::Fresh) => tracing::debug!(%category, "app: cache is fresh"),
            Ok(Refresh::Downloaded(count)) => tracing::info!(%category, count, "app: category cached"),
            Err(e) => tracing::warn!(%category, error = %e, "app: download failed"),
        }
    }
}

fn collect_file(
    path: &Path,
    plan: &Plan,
    expr: Option<&Expr>,
    results: &mut ResultSet,
) -> anyhow::Result<()> {
    let records = load_records(path)?;
    let Some(first) = records.first() else {
        tracing::debug!(path = %path.display(), "app: file holds no records");
        return Ok(());
    };

    let category = classify(first);
    if plan.explicit_types && !plan.categories.contains(&category) {
        let selected: Vec<&str> = plan.categories.iter().map(|c| c.as_str()).collect();
        bail!(
            "file format is '{category}', but --search-type was set to '{}'",
            selected.join(",")
        );
    }

    tracing::debug!(%category, count = records.len(), "app: searching explicit file");
    results.collect(category, records, expr);
    Ok(())
}

fn collect_cached(
    cache: &Cache,
    categories: &[Category],
    expr: Option<&Expr>,
    results: &mut ResultSet,
) {
    for &category in categories {
        match cache.load(category) {
            Ok(Some(records)) => results.collect(category, records, expr),
            Ok(None) => tracing::debug!(%category, "app: no cache file"),
            Err(e) => tracing::warn!(%category, error = %e, "app: skipping unreadable cache file"),
        }
    }
}
