//! # URL and Email Converters
//!
//! Syntactic checks only — liveness probing lives in `curator-liveness`,
//! the one validator allowed a side effect.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::context::Context;
use crate::convert::{Convert, Converter};
use crate::outcome::Outcome;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static pattern"));

struct InputToUrl {
    full: bool,
}

impl Convert for InputToUrl {
    fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
        let Some(s) = value.as_str() else {
            return Outcome::ok(value);
        };
        let trimmed = s.trim();
        match Url::parse(trimmed) {
            Ok(url) => {
                if self.full && url.host_str().is_none() {
                    return Outcome::fail_with(value, "URL must be complete");
                }
                Outcome::ok(Value::String(url.to_string()))
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                if self.full {
                    Outcome::fail_with(value, "URL must be complete")
                } else {
                    Outcome::ok(Value::String(trimmed.to_string()))
                }
            }
            Err(_) => Outcome::fail_with(value, "Invalid URL"),
        }
    }
}

/// Parse a URL string, normalizing it through the `url` crate. With
/// `full`, relative references and host-less schemes are rejected.
pub fn input_to_url(full: bool) -> Converter {
    Converter::new(InputToUrl { full })
}

struct InputToEmail;

impl Convert for InputToEmail {
    fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
        let Some(s) = value.as_str() else {
            return Outcome::ok(value);
        };
        let lowered = s.trim().to_lowercase();
        if EMAIL_RE.is_match(&lowered) {
            Outcome::ok(Value::String(lowered))
        } else {
            Outcome::fail_with(value, "Invalid email address")
        }
    }
}

/// Parse and lowercase an email address.
pub fn input_to_email() -> Converter {
    Converter::new(InputToEmail)
}
