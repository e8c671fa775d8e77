//! # Temporal Helpers — Canonical ISO-8601 Rendering
//!
//! Converters normalize every date and datetime they accept to one
//! canonical string form, so that re-validating an unchanged record yields
//! a byte-identical tree:
//!
//! - dates render as `YYYY-MM-DD`;
//! - datetimes render as `YYYY-MM-DDTHH:MM:SSZ` — UTC only, seconds
//!   precision, `Z` suffix, never `+00:00`.
//!
//! Parsing is lenient about what it accepts (date-only input promotes to
//! midnight UTC, offsets are converted) but strict about what it emits.

use chrono::{DateTime, NaiveDate, Timelike, Utc};

use crate::error::CuratorError;

/// Parse an ISO-8601 date (`YYYY-MM-DD`), also accepting a full datetime
/// and keeping its date part.
pub fn parse_date(s: &str) -> Result<NaiveDate, CuratorError> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_datetime(s).map(|dt| dt.date_naive())
}

/// Parse an ISO-8601 datetime, converting any offset to UTC and truncating
/// sub-second precision. A bare date is promoted to midnight UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, CuratorError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(truncate_to_seconds(dt.with_timezone(&Utc)));
    }
    // Space-separated and offset-less forms appear in stored records.
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, format) {
            return Ok(truncate_to_seconds(naive.and_utc()));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| CuratorError::InvalidTimestamp(s.to_string()))?;
        return Ok(midnight.and_utc());
    }
    Err(CuratorError::InvalidTimestamp(s.to_string()))
}

/// Render a date in canonical form (`YYYY-MM-DD`).
pub fn date_to_iso8601(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Render a datetime in canonical form (`YYYY-MM-DDTHH:MM:SSZ`).
pub fn datetime_to_iso8601(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
