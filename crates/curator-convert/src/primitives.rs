//! # Primitive Converters
//!
//! The leaves of every schema tree: type checks, value tests, string
//! cleanup, presence handling, and pure transforms. Tests pass the value
//! through unchanged on success and pair it with a human-readable leaf
//! message on failure.
//!
//! Every primitive here except [`require`] treats the absent-marker
//! (`Null`) as trivial success.

use curator_core::ErrorTree;
use regex::Regex;
use serde_json::Value;

use crate::context::Context;
use crate::convert::{Convert, Converter};
use crate::outcome::Outcome;

/// The JSON kinds a [`type_check`] can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    Object,
    Array,
}

impl ValueKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            ValueKind::String => value.is_string(),
            ValueKind::Integer => value.is_i64() || value.is_u64(),
            ValueKind::Float => value.is_number(),
            ValueKind::Boolean => value.is_boolean(),
            ValueKind::Object => value.is_object(),
            ValueKind::Array => value.is_array(),
        }
    }

    fn message(self) -> &'static str {
        match self {
            ValueKind::String => "Value must be a string",
            ValueKind::Integer => "Value must be an integer",
            ValueKind::Float => "Value must be a number",
            ValueKind::Boolean => "Value must be a boolean",
            ValueKind::Object => "Value must be a mapping",
            ValueKind::Array => "Value must be a sequence",
        }
    }
}

struct TypeCheck {
    kind: ValueKind,
}

impl Convert for TypeCheck {
    fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
        if value.is_null() || self.kind.matches(&value) {
            Outcome::ok(value)
        } else {
            let message = self.kind.message();
            Outcome::fail_with(value, message)
        }
    }
}

/// Fail with a type-mismatch message unless the value has the given kind.
pub fn type_check(kind: ValueKind) -> Converter {
    Converter::new(TypeCheck { kind })
}

// ─── Predicate tests ────────────────────────────────────────────────

struct Test<F> {
    predicate: F,
    message: &'static str,
}

impl<F> Convert for Test<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
        if value.is_null() || (self.predicate)(&value) {
            Outcome::ok(value)
        } else {
            Outcome::fail_with(value, self.message)
        }
    }
}

/// Fail with `message` unless `predicate` holds; the value passes through
/// unchanged on success.
pub fn test(
    predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    message: &'static str,
) -> Converter {
    Converter::new(Test { predicate, message })
}

/// Fail unless the value equals `expected`.
pub fn test_equals(expected: Value) -> Converter {
    struct Equals {
        expected: Value,
    }
    impl Convert for Equals {
        fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
            if value.is_null() || value == self.expected {
                Outcome::ok(value)
            } else {
                let message = format!("Value must equal {}", self.expected);
                Outcome::fail(value, ErrorTree::leaf(message))
            }
        }
    }
    Converter::new(Equals { expected })
}

/// Fail with the default membership message unless the string value is one
/// of `allowed`.
pub fn one_of(allowed: &'static [&'static str]) -> Converter {
    one_of_with(allowed, "Value is not in the allowed set")
}

/// Fail with `message` unless the string value is one of `allowed`.
pub fn one_of_with(allowed: &'static [&'static str], message: &'static str) -> Converter {
    test(
        move |value| value.as_str().is_some_and(|s| allowed.contains(&s)),
        message,
    )
}

/// Fail with `message` when the string value is one of `forbidden`. Used
/// for deprecated codes that must be replaced by a preferred one.
pub fn not_one_of(forbidden: &'static [&'static str], message: &'static str) -> Converter {
    test(
        move |value| value.as_str().map_or(true, |s| !forbidden.contains(&s)),
        message,
    )
}

fn as_f64(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// Fail unless the numeric value is at least `floor`.
pub fn greater_or_equal(floor: f64) -> Converter {
    struct Floor {
        floor: f64,
    }
    impl Convert for Floor {
        fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
            match as_f64(&value) {
                _ if value.is_null() => Outcome::ok(value),
                Some(n) if n >= self.floor => Outcome::ok(value),
                _ => {
                    let message =
                        format!("Value must be greater than or equal to {}", self.floor);
                    Outcome::fail(value, ErrorTree::leaf(message))
                }
            }
        }
    }
    Converter::new(Floor { floor })
}

/// Fail unless the numeric value is at most `ceiling`.
pub fn less_or_equal(ceiling: f64) -> Converter {
    struct Ceiling {
        ceiling: f64,
    }
    impl Convert for Ceiling {
        fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
            match as_f64(&value) {
                _ if value.is_null() => Outcome::ok(value),
                Some(n) if n <= self.ceiling => Outcome::ok(value),
                _ => {
                    let message = format!("Value must be less than or equal to {}", self.ceiling);
                    Outcome::fail(value, ErrorTree::leaf(message))
                }
            }
        }
    }
    Converter::new(Ceiling { ceiling })
}

/// Fail with `message` unless the string value matches `pattern` (compile
/// patterns once, in a `LazyLock` static).
pub fn matches(pattern: &'static std::sync::LazyLock<Regex>, message: &'static str) -> Converter {
    test(
        move |value| value.as_str().is_some_and(|s| pattern.is_match(s)),
        message,
    )
}

// ─── String cleanup and presence ────────────────────────────────────

struct CleanupLine;

impl Convert for CleanupLine {
    fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
        match value {
            Value::String(s) => {
                let cleaned = s.split_whitespace().collect::<Vec<_>>().join(" ");
                if cleaned.is_empty() {
                    Outcome::ok(Value::Null)
                } else {
                    Outcome::ok(Value::String(cleaned))
                }
            }
            other => Outcome::ok(other),
        }
    }
}

/// Trim a string, collapse internal runs of blank content to single
/// spaces, and narrow an all-blank string to the absent-marker.
pub fn cleanup_line() -> Converter {
    Converter::new(CleanupLine)
}

struct EmptyToAbsent;

impl Convert for EmptyToAbsent {
    fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
        let empty = match &value {
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if empty {
            Outcome::ok(Value::Null)
        } else {
            Outcome::ok(value)
        }
    }
}

/// Map an empty string/sequence/mapping to the absent-marker.
pub fn empty_to_absent() -> Converter {
    Converter::new(EmptyToAbsent)
}

struct Require;

impl Convert for Require {
    fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
        if value.is_null() {
            Outcome::fail_with(value, "Missing value")
        } else {
            Outcome::ok(value)
        }
    }
}

/// Fail with `Missing value` when the value is the absent-marker. The one
/// primitive that does not pass absence through.
pub fn require() -> Converter {
    Converter::new(Require)
}

struct ExpectAbsent;

impl Convert for ExpectAbsent {
    fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
        if value.is_null() {
            Outcome::ok(value)
        } else {
            Outcome::fail_with(value, "Unexpected value")
        }
    }
}

/// Fail with `Unexpected value` when a value is present at all.
pub fn expect_absent() -> Converter {
    Converter::new(ExpectAbsent)
}

// ─── Pure transforms ────────────────────────────────────────────────

struct MapFn<F> {
    transform: F,
}

impl<F> Convert for MapFn<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
        if value.is_null() {
            Outcome::ok(value)
        } else {
            Outcome::ok((self.transform)(value))
        }
    }
}

/// Apply an infallible transform to a present value.
pub fn map(transform: impl Fn(Value) -> Value + Send + Sync + 'static) -> Converter {
    Converter::new(MapFn { transform })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::LazyLock;

    fn ctx() -> Context {
        Context::new()
    }

    #[test]
    fn type_check_passes_absent_and_matching() {
        let conv = type_check(ValueKind::String);
        assert!(conv.apply(json!(null), &ctx()).is_ok());
        assert!(conv.apply(json!("x"), &ctx()).is_ok());
        let out = conv.apply(json!(7), &ctx());
        assert_eq!(out.error.unwrap().as_leaf(), Some("Value must be a string"));
        assert_eq!(out.value, json!(7));
    }

    #[test]
    fn integer_check_rejects_floats() {
        assert!(type_check(ValueKind::Integer).apply(json!(1.5), &ctx()).error.is_some());
        assert!(type_check(ValueKind::Float).apply(json!(1.5), &ctx()).is_ok());
    }

    #[test]
    fn one_of_accepts_members_only() {
        static CODES: [&str; 2] = ["cc-by", "cc-zero"];
        let conv = one_of(&CODES);
        assert!(conv.apply(json!("cc-by"), &ctx()).is_ok());
        let out = conv.apply(json!("wtfpl"), &ctx());
        assert_eq!(
            out.error.unwrap().as_leaf(),
            Some("Value is not in the allowed set"),
        );
    }

    #[test]
    fn not_one_of_rejects_deprecated_code() {
        let conv = not_one_of(&["KMLZ"], "Invalid format; use \"KML\" instead");
        assert!(conv.apply(json!("KML"), &ctx()).is_ok());
        let out = conv.apply(json!("KMLZ"), &ctx());
        assert_eq!(
            out.error.unwrap().as_leaf(),
            Some("Invalid format; use \"KML\" instead"),
        );
    }

    #[test]
    fn greater_or_equal_bounds_numbers() {
        let conv = greater_or_equal(0.0);
        assert!(conv.apply(json!(0), &ctx()).is_ok());
        assert!(conv.apply(json!(3.5), &ctx()).is_ok());
        assert!(conv.apply(json!(-1), &ctx()).error.is_some());
    }

    #[test]
    fn less_or_equal_bounds_numbers() {
        let conv = less_or_equal(100.0);
        assert!(conv.apply(json!(100), &ctx()).is_ok());
        let out = conv.apply(json!(101), &ctx());
        assert_eq!(
            out.error.unwrap().as_leaf(),
            Some("Value must be less than or equal to 100"),
        );
    }

    #[test]
    fn matches_uses_compiled_pattern() {
        static SLUG: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^[-_\da-z]+$").expect("static pattern"));
        let conv = matches(&SLUG, "String must contain only \"a\"-\"z\", \"0\"-\"9\", \"-\" & \"_\"");
        assert!(conv.apply(json!("foo-bar_1"), &ctx()).is_ok());
        assert!(conv.apply(json!("Foo"), &ctx()).error.is_some());
    }

    #[test]
    fn cleanup_line_trims_and_collapses() {
        let conv = cleanup_line();
        assert_eq!(conv.apply(json!("  a\t\tb  "), &ctx()).value, json!("a b"));
        assert_eq!(conv.apply(json!("   "), &ctx()).value, json!(null));
    }

    #[test]
    fn empty_to_absent_narrows_empty_collections() {
        let conv = empty_to_absent();
        assert_eq!(conv.apply(json!(""), &ctx()).value, json!(null));
        assert_eq!(conv.apply(json!([]), &ctx()).value, json!(null));
        assert_eq!(conv.apply(json!({}), &ctx()).value, json!(null));
        assert_eq!(conv.apply(json!("x"), &ctx()).value, json!("x"));
    }

    #[test]
    fn require_rejects_absent() {
        let out = require().apply(json!(null), &ctx());
        assert_eq!(out.error.unwrap().as_leaf(), Some("Missing value"));
        assert!(require().apply(json!(false), &ctx()).is_ok());
    }

    #[test]
    fn expect_absent_rejects_present() {
        assert!(expect_absent().apply(json!(null), &ctx()).is_ok());
        let out = expect_absent().apply(json!("cached"), &ctx());
        assert_eq!(out.error.unwrap().as_leaf(), Some("Unexpected value"));
    }

    #[test]
    fn map_skips_absent() {
        let conv = map(|v| json!(v.as_str().map(str::to_uppercase).unwrap_or_default()));
        assert_eq!(conv.apply(json!(null), &ctx()).value, json!(null));
        assert_eq!(conv.apply(json!("csv"), &ctx()).value, json!("CSV"));
    }
}
