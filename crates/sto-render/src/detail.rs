//! Full-detail views, one per category.
//!
//! Each view writes a block of labelled lines followed by a 40-dash
//! separator. Long text fields go through
//! [`format_text_with_indent`] so wiki markup is stripped when requested.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use sto_core::types::value_text;
use sto_core::{Category, Record};

use crate::text::format_text_with_indent;

const SEPARATOR_WIDTH: usize = 40;
const DOFF_TIERS: [&str; 6] = ["white", "green", "blue", "purple", "violet", "gold"];

static SECTION_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(head|subhead|text)(\d+)$").expect("section key pattern"));

/// Write the detail view of `record` as `category`.
pub fn write_detail(out: &mut String, category: Category, record: &Record, strip_html: bool) {
    match category {
        Category::Equipment => equipment(out, record, strip_html),
        Category::PersonalTrait => personal_trait(out, record, strip_html),
        Category::StarshipTrait => starship_trait(out, record, strip_html),
        Category::Doff => doff(out, record, strip_html),
        Category::Unknown => unknown(out, record),
    }
    let _ = writeln!(out, "\n{}\n", "-".repeat(SEPARATOR_WIDTH));
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Non-empty text of a field.
fn present(record: &Record, key: &str) -> Option<String> {
    record.text(key).filter(|t| !t.is_empty())
}

fn block(out: &mut String, title: &str, text: &str, strip_html: bool) {
    let _ = writeln!(out, "{title}:");
    let _ = writeln!(out, "{}", format_text_with_indent(text, 1, strip_html));
}

#[derive(Default)]
struct Section {
    head: Option<String>,
    subhead: Option<String>,
    text: Option<String>,
}

fn equipment(out: &mut String, record: &Record, strip_html: bool) {
    for key in ["name", "rarity", "type"] {
        if record.has(key) {
            let _ = writeln!(out, "{}: {}", capitalize(key), record.text_or_empty(key));
        }
    }
    out.push('\n');

    let mut sections: BTreeMap<u32, Section> = BTreeMap::new();
    for (key, value) in &record.fields {
        let Some(caps) = SECTION_KEY.captures(key) else {
            continue;
        };
        let (Some(text), Ok(number)) = (value_text(value), caps[2].parse::<u32>()) else {
            continue;
        };
        let section = sections.entry(number).or_default();
        match caps[1].to_ascii_lowercase().as_str() {
            "head" => section.head = Some(text),
            "subhead" => section.subhead = Some(text),
            _ => section.text = Some(text),
        }
    }

    for section in sections.values() {
        let head = section.head.as_deref().filter(|s| !s.is_empty());
        let subhead = section.subhead.as_deref().filter(|s| !s.is_empty());
        let text = section.text.as_deref().filter(|s| !s.is_empty());

        if let Some(head) = head {
            let _ = writeln!(out, "{head}");
        }
        if let Some(subhead) = subhead {
            let tab = if head.is_some() { "\t" } else { "" };
            let _ = writeln!(out, "{tab}{subhead}");
        }
        if let Some(text) = text {
            let indent = match (head, subhead) {
                (_, Some(_)) => 2,
                (Some(_), None) => 1,
                (None, None) => 0,
            };
            let _ = writeln!(out, "{}", format_text_with_indent(text, indent, strip_html));
        }
    }
}

fn starship_trait(out: &mut String, record: &Record, strip_html: bool) {
    let _ = writeln!(out, "Name: {}", record.text_or_empty("name"));
    let _ = writeln!(out, "Type: {}", record.text_or_empty("type"));
    let _ = writeln!(out, "Short: {}\n", record.text_or_empty("short"));

    if let Some(basic) = present(record, "basic") {
        block(out, "Basic", &basic, strip_html);
    }
    if let Some(detailed) = present(record, "detailed") {
        out.push('\n');
        block(out, "Detailed", &detailed, strip_html);
    }
    if let Some(obtained) = present(record, "obtained") {
        out.push('\n');
        block(out, "Obtained", &obtained, strip_html);
    }
}

fn doff(out: &mut String, record: &Record, strip_html: bool) {
    let _ = writeln!(out, "Specialization: {}", record.text_or_empty("doff_specialization"));
    let _ = writeln!(out, "Ship Duty: {}", record.text_or_empty("shipdutytype"));
    let _ = writeln!(out, "Department: {}\n", record.text_or_empty("department"));

    if let Some(description) = present(record, "description") {
        block(out, "Description", &description, strip_html);
    }
    for tier in DOFF_TIERS {
        if let Some(text) = present(record, tier) {
            out.push('\n');
            block(out, &capitalize(tier), &text, strip_html);
        }
    }
}

fn personal_trait(out: &mut String, record: &Record, strip_html: bool) {
    let _ = writeln!(out, "Name: {}", record.text_or_empty("name"));
    let _ = writeln!(out, "Type: {}", record.text_or_empty("type"));
    let _ = writeln!(out, "Environment: {}", record.text_or_empty("environment"));
    let _ = writeln!(out, "Character Type: {}", record.text_or_empty("chartype"));
    let unique = if record.flag("isunique") { "Yes" } else { "No" };
    let _ = writeln!(out, "Unique: {unique}\n");

    if let Some(description) = present(record, "description") {
        block(out, "Description", &description, strip_html);
    }
}

fn unknown(out: &mut String, record: &Record) {
    for (key, value) in &record.fields {
        let _ = writeln!(out, "{key}: {}", value_text(value).unwrap_or_default());
    }
}
