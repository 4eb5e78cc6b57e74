//! Aggregation — filtering and de-duplicating one category's records.
//!
//! Records are processed in source order. A record is kept when it has an
//! identity (see [`Record::identity`]) that has not been kept before and the
//! search expression (if any) matches it. The identity is marked as seen
//! only once the record is actually kept, so a duplicate that follows a
//! filtered-out first occurrence can still make it into the results.

use std::collections::{BTreeMap, HashSet};

use crate::search::{evaluate, Expr};
use crate::types::{Category, Record};

/// Filter and de-duplicate `records`, preserving source order.
pub fn collect_matches<I>(records: I, expr: Option<&Expr>) -> Vec<Record>
where
    I: IntoIterator<Item = Record>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::new();

    for record in records {
        let Some(identity) = record.identity() else {
            tracing::debug!("aggregate: skipping record without identity");
            continue;
        };
        if seen.contains(&identity) {
            continue;
        }
        if evaluate(expr, &record) {
            seen.insert(identity);
            kept.push(record);
        }
    }

    kept
}

// ---------------------------------------------------------------------------
// ResultSet
// ---------------------------------------------------------------------------

/// Order in which groups are presented. Independent of [`Category::KNOWN`],
/// which is the download order.
pub const DISPLAY_ORDER: [Category; 4] = [
    Category::Equipment,
    Category::StarshipTrait,
    Category::Doff,
    Category::PersonalTrait,
];

/// Matched records grouped by category, built fresh for each run.
///
/// Only the four known categories are held; records attributed to
/// [`Category::Unknown`] are dropped when added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    groups: BTreeMap<Category, Vec<Record>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append already-aggregated records to a category's group.
    pub fn add(&mut self, category: Category, records: Vec<Record>) {
        if !category.is_known() {
            tracing::warn!(count = records.len(), "aggregate: dropping records of unknown category");
            return;
        }
        self.groups.entry(category).or_default().extend(records);
    }

    /// Filter, de-duplicate and add in one step.
    pub fn collect<I>(&mut self, category: Category, records: I, expr: Option<&Expr>)
    where
        I: IntoIterator<Item = Record>,
    {
        let matched = collect_matches(records, expr);
        tracing::debug!(%category, matched = matched.len(), "aggregate: category collected");
        self.add(category, matched);
    }

    pub fn get(&self, category: Category) -> &[Record] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty groups in [`DISPLAY_ORDER`].
    pub fn groups(&self) -> impl Iterator<Item = (Category, &[Record])> {
        DISPLAY_ORDER
            .into_iter()
            .map(move |c| (c, self.get(c)))
            .filter(|(_, records)| !records.is_empty())
    }

    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
