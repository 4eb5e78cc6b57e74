//! Domain-specific assertion macros for sto-cargo-search harnesses.
//!
//! These add context-rich failure messages that make it clear which
//! records a result group actually held.

/// Assert that a result group holds exactly the given identities, in order.
///
/// ```rust
/// assert_group!(results, Category::Doff, ["Conn Officer"]);
/// ```
#[macro_export]
macro_rules! assert_group {
    ($results:expr, $category:expr, [$($name:expr),* $(,)?]) => {{
        let results: &sto_core::ResultSet = &$results;
        let category: sto_core::Category = $category;
        let actual: Vec<String> = results
            .get(category)
            .iter()
            .filter_map(sto_core::Record::identity)
            .collect();
        let expected: Vec<String> = vec![$($name.to_string()),*];
        pretty_assertions::assert_eq!(
            actual, expected,
            "assert_group! failed for category {}", category
        );
    }};
}

/// Assert that a category contributed nothing.
#[macro_export]
macro_rules! assert_group_empty {
    ($results:expr, $category:expr) => {{
        let results: &sto_core::ResultSet = &$results;
        let category: sto_core::Category = $category;
        let group = results.get(category);
        assert!(
            group.is_empty(),
            "assert_group_empty! failed: {} holds {} record(s): {:?}",
            category,
            group.len(),
            group.iter().filter_map(sto_core::Record::identity).collect::<Vec<_>>()
        );
    }};
}

/// Assert that `haystack` contains `needle`, printing the haystack on failure.
pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "expected output to contain {needle:?}\n--- output ---\n{haystack}"
    );
}
