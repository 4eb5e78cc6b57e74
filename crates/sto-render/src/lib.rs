//! sto-render — text presentation of search results.
//!
//! The renderer receives an already classified and de-duplicated
//! [`ResultSet`] and only decides how to show it: a summary table per
//! category, or the full-detail view of every record. It performs no
//! filtering of its own.

pub mod detail;
pub mod html;
pub mod table;
pub mod text;

use std::fmt::Write;

use sto_core::{Category, Record, ResultSet};

pub use html::strip_html_tags;
pub use table::Table;

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Table,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub layout: Layout,
    /// Strip wiki markup from long text fields.
    pub strip_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Table,
            strip_html: true,
        }
    }
}

/// Render every non-empty group of `results`.
///
/// Each group starts with a `=== <CATEGORY> MATCHES ===` header; groups are
/// separated by a blank line. An empty result set renders as an empty
/// string.
pub fn render(results: &ResultSet, options: RenderOptions) -> String {
    let mut out = String::new();

    for (i, (category, records)) in results.groups().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "=== {} MATCHES ===\n", category.title());

        match options.layout {
            Layout::Table => {
                let _ = write!(out, "{}", summary_table(category, records));
            }
            Layout::Full => {
                for record in records {
                    detail::write_detail(&mut out, category, record, options.strip_html);
                }
            }
        }
    }

    out
}

/// Summary table of one category's records.
pub fn summary_table(category: Category, records: &[Record]) -> Table {
    let (headers, cells): (&[&str], fn(&Record) -> Vec<String>) = match category {
        Category::Equipment => (&["Type", "Name", "Rarity"], |r| {
            vec![r.text_or_empty("type"), r.text_or_empty("name"), r.text_or_empty("rarity")]
        }),
        Category::PersonalTrait => (&["Name", "Type", "Environment", "Unique"], |r| {
            vec![
                r.text_or_empty("name"),
                r.text_or_empty("type"),
                r.text_or_empty("environment"),
                if r.flag("isunique") { "Yes" } else { "No" }.to_string(),
            ]
        }),
        Category::StarshipTrait => (&["Type", "Name", "Short"], |r| {
            vec![r.text_or_empty("type"), r.text_or_empty("name"), r.text_or_empty("short")]
        }),
        Category::Doff => (&["DOff Specialization", "Ship Duty", "Department", "Description"], |r| {
            vec![
                r.text_or_empty("doff_specialization"),
                r.text_or_empty("shipdutytype"),
                r.text_or_empty("department"),
                strip_html_tags(&r.text_or_empty("description")),
            ]
        }),
        Category::Unknown => (&["Name"], |r| vec![r.identity().unwrap_or_default()]),
    };

    let mut table = Table::new(headers.iter().copied());
    for record in records {
        table.add_row(cells(record));
    }
    table
}
