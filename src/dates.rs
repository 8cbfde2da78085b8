//! Publication date parsing and display.
//!
//! The content API stamps documents as `2021-03-25T19:25:28+0000`. Dates are
//! displayed in the timestamp's own offset, with month names from the
//! configured locale:
//!
//! ```text
//! %d %b %Y                      → 25 mar 2021
//! *editado em %d %b %Y, às %H:%M → *editado em 25 mar 2021, às 19:25
//! ```
//!
//! Missing or malformed timestamps never fail a build; they simply render as
//! nothing.

use chrono::{DateTime, FixedOffset, Locale};
use std::cmp::Ordering;

/// Parse an API timestamp. Accepts the API's `+0000` offsets and RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// Format an optional timestamp with a strftime pattern in `locale`.
pub fn format_date(raw: Option<&str>, pattern: &str, locale: Locale) -> Option<String> {
    let date = parse_timestamp(raw?)?;
    Some(date.format_localized(pattern, locale).to_string())
}

/// Whether a post was republished after it first went out.
pub fn is_edited(first: Option<&str>, last: Option<&str>) -> bool {
    match (first.and_then(parse_timestamp), last.and_then(parse_timestamp)) {
        (Some(first), Some(last)) => last > first,
        _ => false,
    }
}

/// Chronological comparison of optional timestamps. Undated sorts last.
pub fn compare_published(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a.and_then(parse_timestamp), b.and_then(parse_timestamp)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
