//! Plain-text helpers for CMS-rendered HTML and ACF scalar values.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};

static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tags regex"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[xX]([0-9a-fA-F]{1,6})|#([0-9]{1,7})|([a-zA-Z][a-zA-Z0-9]{1,7}));")
        .expect("valid entity regex")
});

/// Named entities WordPress emits through `wptexturize` and the editor.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("nbsp", " "),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("ndash", "\u{2013}"),
    ("mdash", "\u{2014}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("ldquo", "\u{201c}"),
    ("rdquo", "\u{201d}"),
    ("hellip", "\u{2026}"),
    ("trade", "\u{2122}"),
    ("reg", "\u{ae}"),
    ("copy", "\u{a9}"),
    ("euro", "\u{20ac}"),
    ("pound", "\u{a3}"),
];

/// Removes every `<...>` tag.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    TAGS.replace_all(html, "").into_owned()
}

/// Decodes numeric (`&#8217;`, `&#x2019;`) and common named entities in a
/// single pass, so decoded text is never decoded again (`&amp;lt;` and
/// `&#38;lt;` both become `&lt;`). Unknown entities are left as written.
#[must_use]
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    ENTITY
        .replace_all(input, |caps: &Captures<'_>| {
            let decoded = match (caps.get(1), caps.get(2), caps.get(3)) {
                (Some(hex), _, _) => u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from),
                (None, Some(dec), _) => dec
                    .as_str()
                    .parse::<u32>()
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from),
                (None, None, Some(name)) => NAMED_ENTITIES
                    .iter()
                    .find(|(entity, _)| *entity == name.as_str())
                    .map(|(_, text)| (*text).to_string()),
                _ => None,
            };
            decoded.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Strips tags, decodes entities and collapses runs of whitespace.
#[must_use]
pub fn to_plain_text(html: &str) -> String {
    decode_entities(&strip_tags(html))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trims a value and drops it when nothing is left.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an ACF date value.
///
/// Accepts the date picker's storage format (`YYYYMMDD`), ISO dates, ISO
/// date-times and the `d/m/Y` display format. Anything else is `None`.
#[must_use]
pub fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for format in ["%Y%m%d", "%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    parse_wp_datetime(raw).map(|dt| dt.date())
}

/// Parses the `date` field of a post (`YYYY-MM-DDTHH:MM:SS`, site-local).
#[must_use]
pub fn parse_wp_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
