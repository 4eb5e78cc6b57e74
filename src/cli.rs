//! Command-line surface.
//!
//! [`Cli`] is the raw clap definition. [`Cli::into_plan`] applies the flag
//! rules that clap cannot express on its own (empty search strings,
//! category filtering) and yields a validated [`Plan`] for
//! [`crate::app::run`].

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use sto_core::Category;
use sto_render::{Layout, RenderOptions};

#[derive(Debug, Parser)]
#[command(
    name = "sto-cargo-search",
    about = "Search Star Trek Online wiki cargo data and display matches",
    version
)]
pub struct Cli {
    /// Search a specific JSON file instead of the cached categories.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Comma-separated categories to search:
    /// equipment, personal_trait, starship_trait, doff.
    #[arg(long, value_name = "TYPES")]
    pub search_type: Option<String>,

    /// Search expression, e.g. `"tier 5" and (phaser or disruptor) and not rare`.
    #[arg(long, value_name = "EXPR")]
    pub search: Option<String>,

    /// List every entry instead of searching.
    #[arg(long)]
    pub list_all: bool,

    /// Show full details instead of summary tables.
    #[arg(long)]
    pub full: bool,

    /// Keep HTML markup in text fields.
    #[arg(long)]
    pub no_strip_html: bool,

    /// Redownload every category even if the cache is fresh.
    #[arg(long)]
    pub force_download: bool,

    /// Override the cache directory (`~` is expanded).
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<String>,

    /// Write debug logs to a file (see `[log] file` in config.toml).
    #[arg(long)]
    pub debug: bool,
}

/// What to select once the data is in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Only refresh the cache.
    DownloadOnly,
    ListAll,
    Search(String),
}

/// Validated invocation.
#[derive(Debug, Clone)]
pub struct Plan {
    pub file: Option<PathBuf>,
    /// Categories to search, in category order.
    pub categories: Vec<Category>,
    /// Whether the user narrowed the categories with `--search-type`.
    pub explicit_types: bool,
    /// `--search-type` names that matched no category.
    pub ignored_types: Vec<String>,
    pub query: Query,
    pub force_download: bool,
    pub cache_dir: Option<String>,
    pub render: RenderOptions,
}

impl Cli {
    pub fn into_plan(self) -> anyhow::Result<Plan> {
        let search = self.search.filter(|s| !s.is_empty());

        let query = match (search, self.list_all) {
            (Some(_), true) => bail!("--search and --list-all are mutually exclusive"),
            (Some(expr), false) => Query::Search(expr),
            (None, true) => Query::ListAll,
            (None, false) if self.force_download => Query::DownloadOnly,
            (None, false) => {
                bail!("you must specify at least one of --search, --list-all or --force-download")
            }
        };

        let (categories, ignored_types) = select_categories(self.search_type.as_deref());
        if categories.is_empty() {
            bail!("No valid search types selected");
        }

        Ok(Plan {
            file: self.file,
            categories,
            explicit_types: self.search_type.is_some(),
            ignored_types,
            query,
            force_download: self.force_download,
            cache_dir: self.cache_dir,
            render: RenderOptions {
                layout: if self.full { Layout::Full } else { Layout::Table },
                strip_html: !self.no_strip_html,
            },
        })
    }
}

/// Intersect a comma-separated type list with the known categories.
/// `None` selects every known category.
fn select_categories(types: Option<&str>) -> (Vec<Category>, Vec<String>) {
    let Some(types) = types else {
        return (Category::KNOWN.to_vec(), Vec::new());
    };

    let mut selected = Vec::new();
    let mut ignored = Vec::new();
    for name in types.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match Category::from_name(name) {
            Some(category) if !selected.contains(&category) => selected.push(category),
            Some(_) => {}
            None => ignored.push(name.to_string()),
        }
    }
    selected.sort();
    (selected, ignored)
}
