//! # Reusable Schema Fragments
//!
//! Field-level converters shared by several record schemas: canonical UUID
//! identifiers, slug-like names, human titles, cleaned markdown lines, and
//! partial dates. Each fragment is a plain [`Converter`] the schemas splice
//! into larger pipelines.

use std::sync::LazyLock;

use curator_convert::{
    cleanup_line, empty_to_absent, input_to_iso8601_date, input_to_iso8601_datetime, matches,
    pipe, test, type_check, Converter, ValueKind,
};
use regex::Regex;

/// Canonical UUID shape (lowercase hex, dashed).
static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\da-f]{8}-[\da-f]{4}-[\da-f]{4}-[\da-f]{4}-[\da-f]{12}$")
        .expect("static pattern")
});

/// Characters a slug-like name may contain.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-_\da-z]+$").expect("static pattern"));

/// A year, year-month, or year-month-day string.
static YEAR_OR_MONTH_OR_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-2]\d{3}(-(0[1-9]|1[0-2])(-([0-2]\d|3[0-1]))?)?$").expect("static pattern")
});

/// A bare four-digit year embedded anywhere in a string.
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^\d])(19|20)\d\d([^\d]|$)").expect("static pattern"));

fn str_test(
    predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    message: &'static str,
) -> Converter {
    test(
        move |value| value.as_str().map_or(true, &predicate),
        message,
    )
}

/// Python-style `islower`: at least one cased character, none uppercase.
fn is_all_lowercase(s: &str) -> bool {
    s.chars().any(char::is_alphabetic) && !s.chars().any(char::is_uppercase)
}

/// An identifier field: canonical UUID shape.
pub fn json_to_uuid() -> Converter {
    pipe([
        type_check(ValueKind::String),
        matches(&UUID_RE, "Invalid ID"),
    ])
}

/// A slug-like `name` field: lowercase `[a-z0-9_-]`, no leading/trailing or
/// doubled separators, bounded length. Each rule fails with its own
/// message so one look at the alert says what to fix.
pub fn json_to_name() -> Converter {
    pipe([
        type_check(ValueKind::String),
        str_test(|s| s == s.trim(), "String begins or ends with spaces"),
        str_test(|s| s == s.trim_matches('-'), "String begins or ends with \"-\""),
        str_test(|s| s == s.trim_matches('_'), "String begins or ends with \"_\""),
        str_test(|s| !s.contains("--"), "String contains duplicate \"-\""),
        str_test(|s| !s.contains("__"), "String contains duplicate \"_\""),
        str_test(is_all_lowercase, "String must contain only lowercase characters"),
        matches(&NAME_RE, "String must contain only \"a\"-\"z\", \"0\"-\"9\", \"-\" & \"_\""),
        str_test(|s| s.chars().count() <= 100, "String is too long"),
    ])
}

/// A tag name: like a slug, plus a two-character minimum.
pub fn json_to_tag_name() -> Converter {
    pipe([
        type_check(ValueKind::String),
        str_test(|s| s == s.trim(), "String begins or ends with spaces"),
        str_test(|s| s == s.trim_matches('-'), "String begins or ends with \"-\""),
        str_test(|s| !s.contains("--"), "String contains duplicate \"-\""),
        str_test(is_all_lowercase, "String must contain only lowercase characters"),
        matches(&NAME_RE, "String must contain only \"a\"-\"z\", \"0\"-\"9\" & \"-\""),
        str_test(|s| s.chars().count() >= 2, "String is too short"),
        str_test(|s| s.chars().count() <= 100, "String is too long"),
    ])
}

/// A human title: trimmed, non-empty, must not begin with a lowercase
/// character. Length and embedded-year rules are layered on per field.
pub fn json_to_title() -> Converter {
    pipe([
        type_check(ValueKind::String),
        str_test(|s| s == s.trim(), "String begins or ends with spaces"),
        empty_to_absent(),
        str_test(
            |s| !s.chars().next().is_some_and(char::is_lowercase),
            "String must begin with an uppercase character",
        ),
    ])
}

/// Fail when a bare four-digit year is embedded in the string.
pub fn without_embedded_year() -> Converter {
    str_test(|s| !YEAR_RE.is_match(s), "String contains a year")
}

/// Fail unless the string has at least `floor` characters.
pub fn min_length(floor: usize) -> Converter {
    str_test(move |s| s.chars().count() >= floor, "String is too short")
}

/// A free-text markdown line, cleaned up.
pub fn json_to_markdown() -> Converter {
    pipe([type_check(ValueKind::String), cleanup_line()])
}

/// A partial date: year, year-month, or year-month-day.
pub fn json_to_year_or_month_or_day() -> Converter {
    pipe([
        type_check(ValueKind::String),
        matches(&YEAR_OR_MONTH_OR_DAY_RE, "Invalid year or month or day"),
    ])
}

/// A date field rendered canonically (`YYYY-MM-DD`).
pub fn json_to_iso8601_date() -> Converter {
    pipe([type_check(ValueKind::String), input_to_iso8601_date()])
}

/// A datetime field rendered canonically (`YYYY-MM-DDTHH:MM:SSZ`).
pub fn json_to_iso8601_datetime() -> Converter {
    pipe([type_check(ValueKind::String), input_to_iso8601_datetime()])
}
