//! # Temporal Converters
//!
//! Parse date and datetime strings and re-emit them in the one canonical
//! ISO-8601 form the rest of the system compares by. Parsing is lenient
//! (offsets, bare dates, space separators); output is strict.

use curator_core::temporal;
use serde_json::Value;

use crate::context::Context;
use crate::convert::{Convert, Converter};
use crate::outcome::Outcome;

struct IsoDate;

impl Convert for IsoDate {
    fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
        let Some(s) = value.as_str() else {
            return Outcome::ok(value);
        };
        match temporal::parse_date(s) {
            Ok(date) => Outcome::ok(Value::String(temporal::date_to_iso8601(date))),
            Err(_) => Outcome::fail_with(value, "Value must be a date in ISO 8601 format"),
        }
    }
}

/// Parse a date (or the date part of a datetime) and emit `YYYY-MM-DD`.
pub fn input_to_iso8601_date() -> Converter {
    Converter::new(IsoDate)
}

struct IsoDatetime;

impl Convert for IsoDatetime {
    fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
        let Some(s) = value.as_str() else {
            return Outcome::ok(value);
        };
        match temporal::parse_datetime(s) {
            Ok(dt) => Outcome::ok(Value::String(temporal::datetime_to_iso8601(dt))),
            Err(_) => {
                Outcome::fail_with(value, "Value must be a date time in ISO 8601 format")
            }
        }
    }
}

/// Parse a datetime and emit `YYYY-MM-DDTHH:MM:SSZ` (UTC, seconds
/// precision).
pub fn input_to_iso8601_datetime() -> Converter {
    Converter::new(IsoDatetime)
}
