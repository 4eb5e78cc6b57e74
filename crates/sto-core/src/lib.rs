//! sto-core — core library for sto-cargo-search.
//!
//! This crate holds everything between "a list of JSON rows" and "the rows
//! worth showing": the shared types, the classifier, the search-expression
//! compiler and evaluator, and the de-duplicating aggregator. It also owns
//! the configuration, including the fixed per-category CargoExport queries.
//!
//! # Pipeline
//!
//! ```text
//! Feeds ──► classify ──► aggregate (search + dedup) ──► Render
//! ```

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod search;
pub mod types;

pub use aggregate::{collect_matches, ResultSet, DISPLAY_ORDER};
pub use classify::classify;
pub use search::{compile, Expr, ParseError};
pub use types::{Category, Record};
