//! Core types for sto-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! schema-less [`Record`] read from CargoExport JSON and the [`Category`]
//! discriminant assigned to it by the classifier.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields consulted, in priority order, to find a record's identity.
pub const IDENTITY_FIELDS: [&str; 3] = ["name", "doff_specialization", "_pageName"];

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One flat row of a CargoExport response.
///
/// There is no fixed schema: the set of field names present is what decides
/// the row's [`Category`]. Values are whatever the wiki returned (string,
/// number, boolean or null). Field order follows the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful for fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// True when the field exists, even if its value is null.
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Non-null field values rendered as text.
    pub fn texts(&self) -> impl Iterator<Item = String> + '_ {
        self.fields.values().filter_map(value_text)
    }

    /// Text of a field, or `None` when absent or null.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_text)
    }

    /// Text of a field with absent/null rendered as the empty string.
    pub fn text_or_empty(&self, key: &str) -> String {
        self.text(key).unwrap_or_default()
    }

    /// Truthiness of a field the way the wiki data uses flags: absent, null,
    /// `false`, `0`, `""` and `"0"` are false.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::String(s)) if s == "0" => false,
            Some(value) => is_truthy(value),
            None => false,
        }
    }

    /// De-duplication key: the text of the first of [`IDENTITY_FIELDS`]
    /// holding a truthy value. Null, `false`, zero and empty values are
    /// skipped; the string `"0"` is a valid identity.
    pub fn identity(&self) -> Option<String> {
        IDENTITY_FIELDS
            .iter()
            .filter_map(|key| self.get(key))
            .find(|value| is_truthy(value))
            .and_then(value_text)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Render a JSON value as display/search text. Null has no text.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Which CargoExport data set a record belongs to.
///
/// `Unknown` is the classifier's sentinel for rows that match none of the
/// structural rules; it has no remote table and no cache file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Equipment,
    PersonalTrait,
    StarshipTrait,
    Doff,
    Unknown,
}

impl Category {
    /// The four downloadable categories, in download and display order.
    pub const KNOWN: [Category; 4] = [
        Category::Equipment,
        Category::PersonalTrait,
        Category::StarshipTrait,
        Category::Doff,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Equipment => "equipment",
            Category::PersonalTrait => "personal_trait",
            Category::StarshipTrait => "starship_trait",
            Category::Doff => "doff",
            Category::Unknown => "unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != Category::Unknown
    }

    /// Parse one of the four known names. `"unknown"` is not accepted.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::KNOWN
            .into_iter()
            .find(|c| c.as_str() == name.trim())
    }

    /// Section title used by the presenter, e.g. `STARSHIP TRAIT`.
    pub fn title(self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
