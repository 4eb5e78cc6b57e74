//! Test builders — ergonomic constructors for records, plans and configs.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::path::Path;

use clap::Parser;
use serde_json::Value;
use sto_cargo_search::{Cli, Plan};
use sto_core::config::Config;
use sto_core::Record;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Equipment row with the fields the classifier and table view use.
pub fn equipment(name: &str, rarity: &str, kind: &str) -> Record {
    Record::new()
        .with("name", name)
        .with("rarity", rarity)
        .with("type", kind)
        .with("head1", "Stats")
        .with("text1", format!("{kind} stats"))
}

pub fn personal_trait(name: &str, environment: &str, description: &str) -> Record {
    Record::new()
        .with("name", name)
        .with("chartype", "both")
        .with("environment", environment)
        .with("type", "Trait")
        .with("isunique", 0)
        .with("description", description)
}

pub fn starship_trait(name: &str, short: &str) -> Record {
    Record::new()
        .with("name", name)
        .with("type", "Starship")
        .with("short", short)
        .with("basic", format!("{short}<br>More"))
        .with("detailed", Value::Null)
        .with("obtained", "Reward")
}

pub fn doff(specialization: &str, department: &str, description: &str) -> Record {
    Record::new()
        .with("_pageName", format!("Specialization: {specialization}"))
        .with("doff_specialization", specialization)
        .with("shipdutytype", "Space")
        .with("department", department)
        .with("description", description)
}

/// Names (identities) of `records`, in order.
pub fn names(records: &[Record]) -> Vec<String> {
    records.iter().filter_map(Record::identity).collect()
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Parse and validate a command line (without the program name).
pub fn plan(args: &[&str]) -> anyhow::Result<Plan> {
    let argv = std::iter::once("sto-cargo-search").chain(args.iter().copied());
    Cli::try_parse_from(argv)?.into_plan()
}

/// Parse a command line that must be valid, pointing the cache at `cache_dir`.
pub fn plan_in(cache_dir: &Path, args: &[&str]) -> Plan {
    let dir = cache_dir.to_str().expect("utf-8 temp path");
    let mut argv = vec!["--cache-dir", dir];
    argv.extend_from_slice(args);
    plan(&argv).expect("valid command line")
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Defaults pointed at a fake export endpoint with no page delay.
pub fn config_for(export_url: &str) -> Config {
    let mut config = Config::defaults();
    config.wiki.export_url = export_url.to_string();
    config.wiki.page_delay_ms = 0;
    config
}
