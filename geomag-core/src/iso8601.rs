//! Conversion between `DateTime<Utc>` and ISO-8601 text.
//!
//! Failures never surface as errors: text that is not a timestamp parses to
//! `None`. Formatting keeps millisecond precision, which is the precision the
//! sampling arithmetic works in, so `parse(&format(t)) == Some(t)` for any
//! millisecond-aligned `t`.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Parse an ISO-8601 date-time.
///
/// Accepts RFC 3339 text with a zone designator (`Z` or `±hh:mm`), converted
/// to UTC, and zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` text, read as UTC.
/// Returns `None` for anything else.
#[must_use]
pub fn parse(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a time as `YYYY-MM-DDTHH:MM:SS.fffZ`.
///
/// Sub-millisecond digits are dropped, not rounded.
#[must_use]
pub fn format(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
