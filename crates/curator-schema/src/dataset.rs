//! # Dataset Schemas — Error Pass and Warning Pass
//!
//! A dataset is validated twice, against progressively relaxed input:
//!
//! 1. the **error pass** checks the must-fix rules (URL shape on the
//!    record, its resources and related documents);
//! 2. the **warning pass** runs on the *output* of the error pass and
//!    checks everything else.
//!
//! Fields the error pass fully validated appear in the warning schema as
//! explicit pass-throughs (`noop`) — the warning pass assumes error-pass
//! invariants for those fields rather than re-validating and double-
//! reporting them. One cross-field rule runs after both passes:
//! `temporal_coverage_from` is required unless `frequency` is the
//! real-time code.
//!
//! Both schemas are built once and shared; they are immutable converter
//! trees safe to use from any thread.

use std::sync::LazyLock;

use curator_core::{Alerts, ErrorTree, NodeBuilder};
use curator_convert::{
    cleanup_line, empty_to_absent, expect_absent, greater_or_equal, input_to_email, input_to_url,
    map, noop, one_of, one_of_with, not_one_of, pipe, require, strukt, test, test_conv,
    test_equals, tuple_seq, type_check, uniform_seq, Context, Converter, UnlistedPolicy,
    ValueKind,
};
use serde_json::{json, Value};

use crate::fragments::{
    json_to_iso8601_date, json_to_iso8601_datetime, json_to_markdown, json_to_name,
    json_to_tag_name, json_to_title, json_to_uuid, json_to_year_or_month_or_day, min_length,
    without_embedded_year,
};
use crate::vocab::{
    COVERAGE_GRANULARITIES, LICENSE_IDS, REALTIME_FREQUENCY, RELATED_TYPES, RESOURCE_FORMATS,
    RESOURCE_TYPES, TERRITORY_TYPES, UPDATE_FREQUENCIES,
};

/// A syntactically complete URL (scheme + host).
fn full_url() -> Converter {
    input_to_url(true)
}

/// The error pass: URL shape on the record itself, its related documents,
/// and its resources. Everything else passes through unchanged for the
/// warning pass to inspect.
pub static DATASET_ERROR_SCHEMA: LazyLock<Converter> = LazyLock::new(|| {
    pipe([
        type_check(ValueKind::Object),
        strukt(
            [
                ("license_url", pipe([type_check(ValueKind::String), full_url()])),
                (
                    "related",
                    pipe([
                        type_check(ValueKind::Array),
                        uniform_seq(pipe([
                            type_check(ValueKind::Object),
                            strukt(
                                [
                                    (
                                        "image_url",
                                        pipe([type_check(ValueKind::String), full_url()]),
                                    ),
                                    ("url", pipe([type_check(ValueKind::String), full_url()])),
                                ],
                                UnlistedPolicy::Keep,
                            ),
                        ])),
                        empty_to_absent(),
                    ]),
                ),
                (
                    "resources",
                    pipe([
                        type_check(ValueKind::Array),
                        uniform_seq(pipe([
                            type_check(ValueKind::Object),
                            strukt(
                                [(
                                    "url",
                                    pipe([
                                        type_check(ValueKind::String),
                                        full_url(),
                                        require(),
                                    ]),
                                )],
                                UnlistedPolicy::Keep,
                            ),
                        ])),
                        empty_to_absent(),
                        require(),
                    ]),
                ),
                ("url", pipe([type_check(ValueKind::String), full_url()])),
            ],
            UnlistedPolicy::Keep,
        ),
    ])
});

/// The warning pass: every remaining field rule. Runs on the error pass's
/// output; fields marked `noop` were already validated there.
pub static DATASET_WARNING_SCHEMA: LazyLock<Converter> = LazyLock::new(|| {
    pipe([
        type_check(ValueKind::Object),
        strukt(
            [
                ("alerts", type_check(ValueKind::Object)),
                ("author", json_to_title()),
                ("author_email", input_to_email()),
                ("draft_id", pipe([json_to_uuid(), require()])),
                ("extras", extras_schema()),
                (
                    "frequency",
                    pipe([
                        type_check(ValueKind::String),
                        one_of_with(&UPDATE_FREQUENCIES, "Invalid frequency"),
                        require(),
                    ]),
                ),
                ("groups", groups_schema()),
                ("id", pipe([json_to_uuid(), require()])),
                (
                    "isopen",
                    pipe([type_check(ValueKind::Boolean), test_equals(json!(true)), require()]),
                ),
                (
                    "license_id",
                    pipe([type_check(ValueKind::String), one_of(&LICENSE_IDS), require()]),
                ),
                (
                    "license_title",
                    pipe([type_check(ValueKind::String), cleanup_line(), require()]),
                ),
                ("license_url", noop()), // already validated by the error pass
                ("maintainer", json_to_title()),
                ("maintainer_email", input_to_email()),
                ("metadata_created", pipe([json_to_iso8601_date(), require()])),
                ("metadata_modified", pipe([json_to_iso8601_date(), require()])),
                ("name", pipe([json_to_name(), require()])),
                (
                    "notes",
                    pipe([json_to_markdown(), require()]),
                ),
                (
                    "num_resources",
                    pipe([type_check(ValueKind::Integer), greater_or_equal(0.0)]),
                ),
                (
                    "num_tags",
                    pipe([type_check(ValueKind::Integer), greater_or_equal(0.0)]),
                ),
                ("organization", type_check(ValueKind::Object)),
                ("owner_org", json_to_uuid()),
                (
                    "private",
                    pipe([type_check(ValueKind::Boolean), test_equals(json!(false))]),
                ),
                ("related", related_schema()),
                ("relationships_as_object", expect_absent()),
                ("relationships_as_subject", expect_absent()),
                ("resources", resources_schema()),
                ("revision_id", pipe([json_to_uuid(), require()])),
                ("revision_timestamp", pipe([json_to_iso8601_datetime(), require()])),
                (
                    "state",
                    pipe([type_check(ValueKind::String), test_equals(json!("active"))]),
                ),
                ("supplier", type_check(ValueKind::Object)),
                ("supplier_id", json_to_uuid()),
                ("tags", tags_schema()),
                ("temporal_coverage_from", json_to_year_or_month_or_day()),
                ("temporal_coverage_to", json_to_year_or_month_or_day()),
                ("territorial_coverage", territorial_coverage_schema()),
                (
                    "territorial_coverage_granularity",
                    pipe([
                        type_check(ValueKind::String),
                        one_of(&COVERAGE_GRANULARITIES),
                        require(),
                    ]),
                ),
                ("timestamp", pipe([json_to_iso8601_datetime(), require()])),
                (
                    "title",
                    pipe([
                        json_to_title(),
                        min_length(8),
                        without_embedded_year(),
                        require(),
                    ]),
                ),
                ("tracking_summary", type_check(ValueKind::Object)),
                (
                    "type",
                    pipe([type_check(ValueKind::String), test_equals(json!("dataset"))]),
                ),
                ("url", noop()), // already validated by the error pass
                (
                    "version",
                    pipe([type_check(ValueKind::String), cleanup_line(), expect_absent()]),
                ),
                (
                    "weight",
                    pipe([type_check(ValueKind::Float), greater_or_equal(0.0)]),
                ),
            ],
            UnlistedPolicy::Reject,
        ),
    ])
});

fn extras_schema() -> Converter {
    pipe([
        type_check(ValueKind::Array),
        uniform_seq(pipe([
            type_check(ValueKind::Object),
            strukt(
                [
                    ("key", pipe([json_to_title(), require()])),
                    (
                        "value",
                        pipe([type_check(ValueKind::String), cleanup_line(), require()]),
                    ),
                ],
                UnlistedPolicy::Keep,
            ),
            require(),
        ])),
        empty_to_absent(),
    ])
}

fn groups_schema() -> Converter {
    pipe([
        type_check(ValueKind::Array),
        uniform_seq(pipe([
            type_check(ValueKind::Object),
            strukt(
                [
                    ("id", pipe([json_to_uuid(), require()])),
                    ("description", json_to_markdown()),
                    ("name", pipe([json_to_name(), require()])),
                    ("title", pipe([json_to_title(), require()])),
                ],
                UnlistedPolicy::Reject,
            ),
            require(),
        ])),
        empty_to_absent(),
        require(),
    ])
}

fn related_schema() -> Converter {
    pipe([
        type_check(ValueKind::Array),
        uniform_seq(pipe([
            type_check(ValueKind::Object),
            strukt(
                [
                    ("created", pipe([json_to_iso8601_datetime(), require()])),
                    ("description", pipe([json_to_markdown(), require()])),
                    (
                        "featured",
                        pipe([
                            type_check(ValueKind::Boolean),
                            test_equals(json!(false)),
                            require(),
                        ]),
                    ),
                    ("id", pipe([json_to_uuid(), require()])),
                    ("image_url", require()), // already validated by the error pass
                    ("owner_id", pipe([json_to_uuid(), require()])),
                    (
                        "title",
                        pipe([json_to_title(), min_length(8), require()]),
                    ),
                    (
                        "type",
                        pipe([
                            type_check(ValueKind::String),
                            cleanup_line(),
                            one_of(&RELATED_TYPES),
                        ]),
                    ),
                    ("url", require()), // already validated by the error pass
                    (
                        "view_count",
                        pipe([
                            type_check(ValueKind::Integer),
                            greater_or_equal(0.0),
                            require(),
                        ]),
                    ),
                ],
                UnlistedPolicy::Reject,
            ),
            require(),
        ])),
        empty_to_absent(),
    ])
}

fn resources_schema() -> Converter {
    pipe([
        type_check(ValueKind::Array),
        uniform_seq(pipe([
            type_check(ValueKind::Object),
            strukt(
                [
                    ("cache_last_updated", expect_absent()),
                    ("cache_url", expect_absent()),
                    ("created", pipe([json_to_iso8601_date(), require()])),
                    // A resource may carry only a name; the description
                    // stays optional.
                    ("description", json_to_markdown()),
                    ("format", resource_format_schema()),
                    ("hash", expect_absent()),
                    ("id", pipe([json_to_uuid(), require()])),
                    ("last_modified", json_to_iso8601_date()),
                    ("mimetype", expect_absent()),
                    ("mimetype_inner", expect_absent()),
                    (
                        "name",
                        pipe([
                            type_check(ValueKind::String),
                            test(
                                |v| v.as_str().map_or(true, |s| s == s.trim()),
                                "String begins or ends with spaces",
                            ),
                            empty_to_absent(),
                            require(),
                        ]),
                    ),
                    (
                        "position",
                        pipe([
                            type_check(ValueKind::Integer),
                            greater_or_equal(0.0),
                            require(),
                        ]),
                    ),
                    ("resource_group_id", pipe([json_to_uuid(), require()])),
                    (
                        "resource_type",
                        pipe([type_check(ValueKind::String), one_of(&RESOURCE_TYPES)]),
                    ),
                    ("revision_id", pipe([json_to_uuid(), require()])),
                    (
                        "revision_timestamp",
                        pipe([json_to_iso8601_datetime(), require()]),
                    ),
                    ("size", expect_absent()),
                    (
                        "state",
                        pipe([type_check(ValueKind::String), test_equals(json!("active"))]),
                    ),
                    (
                        "tracking_summary",
                        pipe([
                            type_check(ValueKind::Object),
                            strukt(
                                [
                                    (
                                        "recent",
                                        pipe([
                                            type_check(ValueKind::Integer),
                                            greater_or_equal(0.0),
                                            require(),
                                        ]),
                                    ),
                                    (
                                        "total",
                                        pipe([
                                            type_check(ValueKind::Integer),
                                            greater_or_equal(0.0),
                                            require(),
                                        ]),
                                    ),
                                ],
                                UnlistedPolicy::Reject,
                            ),
                            require(),
                        ]),
                    ),
                    ("url", noop()), // already validated by the error pass
                    ("webstore_last_updated", expect_absent()),
                    ("webstore_url", expect_absent()),
                ],
                UnlistedPolicy::Reject,
            ),
            require(),
        ])),
        empty_to_absent(),
    ])
}

/// Formats are matched case-insensitively (the store mixes cases), so the
/// membership probe uppercases a copy and the original value survives.
fn resource_format_schema() -> Converter {
    pipe([
        type_check(ValueKind::String),
        test_conv(pipe([
            map(|v| {
                Value::String(v.as_str().map(str::to_uppercase).unwrap_or_default())
            }),
            not_one_of(&["KMLZ"], "Invalid format; use \"KML\" instead"),
            not_one_of(&["SVGZ"], "Invalid format; use \"SVG\" instead"),
            not_one_of(&["XLSX"], "Invalid format; use \"XLS\" instead"),
            one_of(&RESOURCE_FORMATS),
        ])),
        require(),
    ])
}

fn tags_schema() -> Converter {
    pipe([
        type_check(ValueKind::Array),
        uniform_seq(pipe([
            type_check(ValueKind::Object),
            strukt(
                [("name", pipe([json_to_tag_name(), require()]))],
                UnlistedPolicy::Keep,
            ),
            require(),
        ])),
        empty_to_absent(),
        require(),
    ])
}

/// `territorial_coverage` is a comma-separated list of `TYPE/VALUE` pairs;
/// each pair is split and validated positionally, with errors keyed by the
/// pair's index in the list.
fn territorial_coverage_schema() -> Converter {
    pipe([
        type_check(ValueKind::String),
        map(|v| match v {
            Value::String(s) => {
                Value::Array(s.split(',').map(|part| json!(part)).collect())
            }
            other => other,
        }),
        uniform_seq(pipe([
            empty_to_absent(),
            test(
                |v| v.as_str().map_or(true, |s| s.matches('/').count() == 1),
                "Invalid territory",
            ),
            map(|v| match v {
                Value::String(s) => {
                    Value::Array(s.split('/').map(|part| json!(part)).collect())
                }
                other => other,
            }),
            tuple_seq([
                pipe([
                    empty_to_absent(),
                    one_of_with(&TERRITORY_TYPES, "Invalid territory type"),
                    require(),
                ]),
                pipe([empty_to_absent(), require()]),
            ]),
            require(),
        ])),
        empty_to_absent(),
        require(),
    ])
}

/// Run both passes over a dataset and assemble its alerts.
///
/// The warning pass consumes the error pass's output, then the cross-field
/// frequency rule runs on the warning pass's output — mirroring how the
/// published record is progressively relaxed.
pub fn check_dataset(dataset: &Value) -> Alerts {
    let ctx = Context::new();
    let (error_verified, errors) = DATASET_ERROR_SCHEMA
        .apply(dataset.clone(), &ctx)
        .into_parts();
    let (warning_verified, mut warnings) = DATASET_WARNING_SCHEMA
        .apply(error_verified, &ctx)
        .into_parts();

    // Cross-field rule: a dataset updated in real time has no fixed start
    // of temporal coverage; every other frequency must declare one.
    let frequency_flagged = warnings
        .as_ref()
        .and_then(|tree| tree.get("frequency"))
        .is_some();
    if !frequency_flagged {
        let frequency = warning_verified.get("frequency").and_then(Value::as_str);
        let coverage_from = warning_verified
            .get("temporal_coverage_from")
            .map_or(true, Value::is_null);
        if frequency != Some(REALTIME_FREQUENCY) && coverage_from {
            let leaf = ErrorTree::leaf("Missing value");
            warnings = match warnings {
                Some(ErrorTree::Node(mut children)) => {
                    children.insert("temporal_coverage_from".to_string(), leaf);
                    Some(ErrorTree::Node(children))
                }
                Some(other) => Some(other),
                None => {
                    let mut node = NodeBuilder::new();
                    node.insert("temporal_coverage_from", Some(leaf));
                    node.finish()
                }
            };
        }
    }

    Alerts {
        error: errors,
        warning: warnings,
    }
}
