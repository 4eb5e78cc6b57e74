//! Configuration types for sto-cargo-search.
//!
//! Two kinds of configuration live here:
//!
//! - [`Config`], the user-tunable settings. [`Config::load`] reads
//!   `~/.config/sto-cargo-search/config.toml`, creating it with hardcoded
//!   defaults if it does not yet exist. [`Config::defaults`] returns the same
//!   defaults without touching the filesystem (useful in tests).
//! - [`CargoQuery`], the fixed per-category description of the remote
//!   CargoExport query. It is a compile-time table, see [`CargoQuery::for_category`].

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::types::Category;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[cache]
# dir = "~/.sto-cargo-cache"
expire_days = 3

[wiki]
export_url    = "https://stowiki.net/wiki/Special:CargoExport"
page_delay_ms = 1000
user_agent    = "sto-cargo-search/0.1"

[log]
# file = "/tmp/sto-cargo-search-debug.log"
"#;

const DEFAULT_CACHE_DIR_NAME: &str = ".sto-cargo-cache";
const DEFAULT_LOG_FILE_NAME: &str = "sto-cargo-search-debug.log";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to create config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub wiki: WikiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// `[cache]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Cache directory; `~` is expanded. Defaults to `~/.sto-cargo-cache`.
    #[serde(default)]
    pub dir: Option<String>,
    /// Cache files older than this many days are refetched.
    #[serde(default = "default_expire_days")]
    pub expire_days: u32,
}

fn default_expire_days() -> u32 { 3 }

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            expire_days: default_expire_days(),
        }
    }
}

impl CacheConfig {
    /// Resolved cache directory.
    pub fn resolved_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => expand_tilde(dir),
            None => default_cache_dir(),
        }
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(u64::from(self.expire_days) * 24 * 60 * 60)
    }
}

/// `[wiki]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiConfig {
    #[serde(default = "default_export_url")]
    pub export_url: String,
    /// Pause between successive pages of the same category.
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_export_url() -> String { "https://stowiki.net/wiki/Special:CargoExport".to_string() }
fn default_page_delay_ms() -> u64 { 1000 }
fn default_user_agent() -> String { "sto-cargo-search/0.1".to_string() }

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            export_url: default_export_url(),
            page_delay_ms: default_page_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl WikiConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

/// `[log]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    /// Destination of `--debug` logs.
    #[serde(default)]
    pub file: Option<String>,
}

impl LogConfig {
    pub fn resolved_file(&self) -> PathBuf {
        match &self.file {
            Some(file) => expand_tilde(file),
            None => std::env::temp_dir().join(DEFAULT_LOG_FILE_NAME),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/sto-cargo-search/config.toml`, layered on top of
    /// the built-in defaults. Creates the file with defaults if it does not
    /// exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path();

        if !path.exists() {
            let io_err = |source| ConfigError::Io { path: path.clone(), source };
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start()).map_err(io_err)?;
        }

        Self::load_from(&path)
    }

    /// Load a specific file layered on top of the built-in defaults. A
    /// missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Remote query table
// ---------------------------------------------------------------------------

/// How one category is fetched from the CargoExport endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CargoQuery {
    pub tables: &'static str,
    pub fields: &'static str,
    /// Page size; a shorter page ends pagination.
    pub limit: usize,
    pub where_clause: Option<&'static str>,
}

const EQUIPMENT: CargoQuery = CargoQuery {
    tables: "Infobox",
    fields: concat!(
        "_pageName=Page,name,rarity,type,boundto,boundwhen,who,",
        "head1,head2,head3,head4,head5,head6,head7,head8,head9,",
        "subhead1,subhead2,subhead3,subhead4,subhead5,subhead6,subhead7,subhead8,subhead9,",
        "text1,text2,text3,text4,text5,text6,text7,text8,text9",
    ),
    limit: 5000,
    where_clause: None,
};

const PERSONAL_TRAIT: CargoQuery = CargoQuery {
    tables: "Traits",
    fields: "_pageName=Page,name,chartype,environment,type,isunique,description",
    limit: 2500,
    where_clause: None,
};

const STARSHIP_TRAIT: CargoQuery = CargoQuery {
    tables: "StarshipTraits",
    fields: "_pageName=Page,name,short,type,detailed,obtained,basic",
    limit: 2500,
    where_clause: Some("name IS NOT NULL"),
};

const DOFF: CargoQuery = CargoQuery {
    tables: "Specializations",
    fields: "_pageName=Page,name=doff_specialization,shipdutytype,department,description,white,green,blue,purple,violet,gold",
    limit: 1000,
    where_clause: None,
};

impl CargoQuery {
    /// Query for a category; `None` for [`Category::Unknown`].
    pub fn for_category(category: Category) -> Option<&'static CargoQuery> {
        match category {
            Category::Equipment => Some(&EQUIPMENT),
            Category::PersonalTrait => Some(&PERSONAL_TRAIT),
            Category::StarshipTrait => Some(&STARSHIP_TRAIT),
            Category::Doff => Some(&DOFF),
            Category::Unknown => None,
        }
    }

    /// Request parameters for the page starting at `offset`.
    pub fn params(&self, offset: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("tables", self.tables.to_string()),
            ("fields", self.fields.to_string()),
            ("limit", self.limit.to_string()),
            ("offset", offset.to_string()),
            ("format", "json".to_string()),
        ];
        if let Some(clause) = self.where_clause {
            params.push(("where", clause.to_string()));
        }
        params
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
        .join("sto-cargo-search")
        .join("config.toml")
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_cache_dir() -> PathBuf {
    home_dir().join(DEFAULT_CACHE_DIR_NAME)
}

/// Expand a leading `~` or `~/` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        home_dir()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else {
        PathBuf::from(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.cache.expire_days, 3);
        assert_eq!(cfg.cache.dir, None);
        assert_eq!(cfg.wiki.export_url, "https://stowiki.net/wiki/Special:CargoExport");
        assert_eq!(cfg.wiki.page_delay(), Duration::from_secs(1));
        assert_eq!(cfg.cache.max_age(), Duration::from_secs(3 * 86_400));
        assert!(cfg.cache.resolved_dir().ends_with(".sto-cargo-cache"));
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[cache]\nexpire_days = 7\ndir = \"/srv/cargo\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.cache.expire_days, 7);
        assert_eq!(cfg.cache.resolved_dir(), PathBuf::from("/srv/cargo"));
        assert_eq!(cfg.wiki.page_delay_ms, 1000);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.cache.expire_days, 3);
    }

    #[test]
    fn tilde_expansion() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("~/cache"), home_dir().join("cache"));
        assert_eq!(expand_tilde("~"), home_dir());
    }

    #[test]
    fn every_known_category_has_a_query() {
        for category in Category::KNOWN {
            assert!(CargoQuery::for_category(category).is_some(), "{category}");
        }
        assert!(CargoQuery::for_category(Category::Unknown).is_none());
    }

    #[test]
    fn equipment_fields_cover_numbered_sections() {
        let q = CargoQuery::for_category(Category::Equipment).unwrap();
        for prefix in ["head", "subhead", "text"] {
            for i in 1..=9 {
                let field = format!("{prefix}{i}");
                assert!(q.fields.split(',').any(|f| f == field), "{field}");
            }
        }
    }

    #[test]
    fn params_include_where_only_when_configured() {
        let ship = CargoQuery::for_category(Category::StarshipTrait).unwrap();
        let params = ship.params(2500);
        assert!(params.contains(&("offset", "2500".to_string())));
        assert!(params.contains(&("format", "json".to_string())));
        assert!(params.contains(&("where", "name IS NOT NULL".to_string())));

        let doff = CargoQuery::for_category(Category::Doff).unwrap();
        assert!(doff.params(0).iter().all(|(k, _)| *k != "where"));
    }
}
