//! Timestamp normalization for heterogeneous vendor date strings.
//!
//! Vendors deliver bare dates, space-separated datetimes, and proper
//! ISO-8601 instants. Everything funnels through [`normalize_timestamp`]
//! before touching the store, so series keys sort lexicographically.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

/// Canonical timestamp layout: ISO-8601, UTC, second precision, `Z` suffix.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn canonical_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(Z|[+-]\d{2}:?\d{2})$")
            .expect("canonical timestamp regex")
    })
}

/// Convert a raw date/time string into the canonical representation.
///
/// Total function: unparseable input is returned unchanged, never an
/// error. The caller must treat the output as canonical only when
/// [`is_canonical`] holds; a degraded pass-through still makes a unique
/// store key. Rules are tried in order, first match wins:
///
/// 1. Already canonical (has a `T` and a timezone marker) → unchanged.
/// 2. Exactly a 10-character `YYYY-MM-DD` date → append `T00:00:00Z`.
/// 3. Known datetime formats (`YYYY-MM-DD HH:MM:SS`,
///    `YYYY-MM-DDTHH:MM:SS`) → reformat with a `Z` suffix.
/// 4. Anything else → unchanged.
pub fn normalize_timestamp(raw: &str) -> String {
    if let Some(t_pos) = raw.find('T') {
        let tail = &raw[t_pos + 1..];
        if tail.ends_with('Z') || tail.contains('+') || has_trailing_negative_offset(tail) {
            return raw.to_string();
        }
    }

    if raw.len() == 10 && NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
        return format!("{raw}T00:00:00Z");
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format(CANONICAL_FORMAT).to_string();
        }
    }

    raw.to_string()
}

/// Whether `s` matches the canonical timestamp shape
/// (`YYYY-MM-DDTHH:MM:SS` followed by `Z`, `+HH:MM`, or `-HH:MM`).
pub fn is_canonical(s: &str) -> bool {
    canonical_re().is_match(s)
}

/// Parse a canonical timestamp or bare `YYYY-MM-DD` date into an instant.
///
/// Returns `None` for anything else; degraded pass-through keys are not
/// parseable and callers are expected to handle that without failing.
pub fn parse_canonical(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d
            .and_hms_opt(0, 0, 0)
            .map(|ndt| Utc.from_utc_datetime(&ndt));
    }
    None
}

/// Format an instant in the canonical layout.
pub fn to_canonical(dt: &DateTime<Utc>) -> String {
    dt.format(CANONICAL_FORMAT).to_string()
}

/// A trailing `-HH:MM` or `-HHMM` in the time portion is a timezone offset;
/// a `-` elsewhere is a date separator and must not count.
fn has_trailing_negative_offset(tail: &str) -> bool {
    let b = tail.as_bytes();
    let with_colon = b.len() >= 6 && {
        let s = &b[b.len() - 6..];
        s[0] == b'-'
            && s[1].is_ascii_digit()
            && s[2].is_ascii_digit()
            && s[3] == b':'
            && s[4].is_ascii_digit()
            && s[5].is_ascii_digit()
    };
    let without_colon = b.len() >= 5 && {
        let s = &b[b.len() - 5..];
        s[0] == b'-'
            && s[1].is_ascii_digit()
            && s[2].is_ascii_digit()
            && s[3].is_ascii_digit()
            && s[4].is_ascii_digit()
    };
    with_colon || without_colon
}
