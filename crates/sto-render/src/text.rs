//! Indented text blocks for the full-detail view.

use crate::html::strip_html_tags;

/// Format a multi-line text block at `indent` tabs.
///
/// A line containing `:` is split at the first colon into
/// `label<TAB>value`, both sides trimmed.
pub fn format_text_with_indent(text: &str, indent: usize, strip_html: bool) -> String {
    let text = if strip_html {
        strip_html_tags(text)
    } else {
        text.to_string()
    };
    let prefix = "\t".repeat(indent);

    text.split('\n')
        .map(|line| match line.split_once(':') {
            Some((label, value)) => format!("{prefix}{}\t{}", label.trim(), value.trim()),
            None => format!("{prefix}{}", line.trim()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn colon_lines_become_label_value_pairs() {
        let out = format_text_with_indent("Damage: 100<br>  plain  ", 1, true);
        assert_eq!(out, "\tDamage\t100\n\tplain");
    }

    #[test]
    fn html_is_kept_when_not_stripping() {
        let out = format_text_with_indent("<b>x</b>", 0, false);
        assert_eq!(out, "<b>x</b>");
    }

    #[test]
    fn only_first_colon_splits() {
        let out = format_text_with_indent("Time: 10:30", 2, false);
        assert_eq!(out, "\t\tTime\t10:30");
    }
}
