//! Strict ISO-8601 date-time recognition and the canonical `Z` form.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

use crate::error::EncodeError;

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse `s` as a full ISO-8601 date-time, normalized to UTC.
///
/// Accepts RFC 3339 (`Z` or numeric offset) and offset-less local forms, which are taken as
/// UTC. The date part must be `YYYY-MM-DD` followed by `T`; anything else stays text.
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    if !has_date_time_prefix(s.as_bytes()) {
        return None;
    }
    let parsed = match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => LOCAL_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())?
            .and_utc(),
    };
    // An offset may push the instant outside the years the writer can emit
    ensure_representable(&parsed).ok().map(|()| parsed)
}

fn has_date_time_prefix(b: &[u8]) -> bool {
    b.len() >= 16
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
        && b[10] == b'T'
}

/// `YYYY-MM-DDThh:mm:ssZ`, truncated to whole seconds.
pub fn format(ts: &DateTime<Utc>) -> Result<String, EncodeError> {
    ensure_representable(ts)?;
    Ok(ts.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

/// Four-digit years only; anything else has no canonical form.
pub(crate) fn ensure_representable(ts: &DateTime<Utc>) -> Result<(), EncodeError> {
    if (0..=9999).contains(&ts.year()) {
        Ok(())
    } else {
        Err(EncodeError::Unrepresentable {
            kind: format!("timestamp with year {}", ts.year()),
        })
    }
}
