//! Field normalization for mood diary records.
//!
//! Every function here is pure, stateless, and total: malformed input
//! yields `None`, never a panic or an error. Timestamps are anchored to
//! UTC by convention. The source export carries no timezone, so the
//! canonical form declares UTC rather than converting. This is project
//! policy, not a correctness guarantee.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Date-time layout of the source export, e.g. `2024 Fri Jul 05 08:30 AM`.
pub const SOURCE_DATETIME_FORMAT: &str = "%Y %a %b %d %I:%M %p";

fn to_canonical(datetime: DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a source-format timestamp into the canonical UTC RFC 3339 form.
///
/// The weekday in the input must agree with the date; chrono rejects a
/// mismatch, which counts as a parse failure here.
pub fn parse_timestamp(raw: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(raw.trim(), SOURCE_DATETIME_FORMAT).ok()?;
    Some(to_canonical(parsed.and_utc()))
}

/// Normalize a store-side date string to the canonical UTC RFC 3339 form.
///
/// The target store returns dates either with an explicit offset
/// (`2024-07-05T08:30:00.000+00:00`) or naive (`2024-07-05T08:30:00`);
/// both must map to the same dedup key as [`parse_timestamp`] output.
pub fn normalize_dedup_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(to_canonical(datetime.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(to_canonical(naive.and_utc()));
        }
    }
    None
}

/// Round to two decimal places.
pub fn round_two_decimal(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert degrees Fahrenheit to Celsius.
pub fn fahrenheit_to_celsius(value: f64) -> f64 {
    (value - 32.0) * 5.0 / 9.0
}

/// Split a semicolon-delimited multi-value string into clean tokens.
///
/// Tokens are trimmed; empty tokens are dropped.
pub fn split_multi(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}
