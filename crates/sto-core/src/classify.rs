//! Classifier — structural detection of a record's [`Category`].
//!
//! Rules are checked in a fixed order and the first match wins, so a sparse
//! row that happens to satisfy several rules always lands in the same
//! category:
//!
//! 1. `doff_specialization` present → [`Category::Doff`]
//! 2. any of `basic`, `detailed`, `obtained` present → [`Category::StarshipTrait`]
//! 3. both `chartype` and `environment` present → [`Category::PersonalTrait`]
//! 4. any key starting with `head`, `subhead` or `text` (ASCII case-insensitive)
//!    → [`Category::Equipment`]
//! 5. otherwise → [`Category::Unknown`]
//!
//! Only key presence matters; values (including nulls) are ignored.

use crate::types::{Category, Record};

const STARSHIP_TRAIT_KEYS: [&str; 3] = ["basic", "detailed", "obtained"];
const EQUIPMENT_PREFIXES: [&str; 3] = ["head", "subhead", "text"];

/// Determine which category `record` belongs to.
pub fn classify(record: &Record) -> Category {
    if record.has("doff_specialization") {
        Category::Doff
    } else if STARSHIP_TRAIT_KEYS.iter().any(|k| record.has(k)) {
        Category::StarshipTrait
    } else if record.has("chartype") && record.has("environment") {
        Category::PersonalTrait
    } else if record.keys().any(is_equipment_key) {
        Category::Equipment
    } else {
        Category::Unknown
    }
}

fn is_equipment_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    EQUIPMENT_PREFIXES.iter().any(|p| key.starts_with(p))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
