//! sto-cargo-search — search Star Trek Online wiki cargo data.
//!
//! The binary is a thin wrapper over this library so integration tests can
//! drive the same code paths without spawning a process.
//!
//! # Architecture
//!
//! ```text
//! CargoExport ──► Cache ──┐
//!                         ├──► classify / search / dedup ──► Render
//!   --file JSON ──────────┘
//! ```
//!
//! Everything runs sequentially on a single-threaded runtime: categories
//! are downloaded one after another, then searched one after another.

pub mod app;
pub mod cli;

pub use app::run;
pub use cli::{Cli, Plan, Query};
