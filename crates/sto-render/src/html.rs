//! HTML stripping for wiki text.
//!
//! Wiki fields carry inline markup (`<br>`, `<b>`, links) and character
//! entities. Stripping happens in this order: entities are decoded, line
//! breaks become `\n`, comments and remaining tags are removed. Decoding
//! first means escaped markup such as `&lt;b&gt;` is removed too.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);").expect("entity pattern")
});
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern"));
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z!][^>]*>").expect("tag pattern"));

/// Decode named and numeric character references. Unknown names are kept
/// verbatim.
pub fn unescape(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let body = &caps[1];
            decode_entity(body).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(body: &str) -> Option<String> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(|c: char| c == 'x' || c == 'X') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    let decoded = match body {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bull" => "\u{2022}",
        "middot" => "\u{b7}",
        "times" => "\u{d7}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        _ => return None,
    };
    Some(decoded.to_string())
}

/// Remove markup from wiki text, keeping line breaks.
pub fn strip_html_tags(text: &str) -> String {
    let text = unescape(text);
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = COMMENT.replace_all(&text, "");
    TAG.replace_all(&text, "").into_owned()
}
