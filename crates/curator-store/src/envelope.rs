//! # API Envelope Validation
//!
//! Every store response wraps its payload in a versioned envelope:
//!
//! ```json
//! {
//!   "apiVersion": "1.0",
//!   "method": "GET",
//!   "params": {},
//!   "url": "http://example.org/api/1/datasets",
//!   "value": …
//! }
//! ```
//!
//! The envelope is validated with the same converter library the schemas
//! use; a failure here is an invariant violation — the store broke its
//! contract — and surfaces as [`StoreError::InvalidEnvelope`] rather than
//! as a per-record alert.

use std::sync::LazyLock;

use curator_convert::{
    input_to_url, noop, pipe, require, strukt, test_equals, type_check, Context, Converter,
    UnlistedPolicy, ValueKind,
};
use serde_json::{json, Value};

use crate::error::StoreError;

static ENVELOPE_SCHEMA: LazyLock<Converter> = LazyLock::new(|| {
    pipe([
        type_check(ValueKind::Object),
        strukt(
            [
                (
                    "apiVersion",
                    pipe([test_equals(json!("1.0")), require()]),
                ),
                ("context", noop()),
                (
                    "method",
                    pipe([type_check(ValueKind::String), require()]),
                ),
                ("params", type_check(ValueKind::Object)),
                (
                    "url",
                    pipe([
                        type_check(ValueKind::String),
                        input_to_url(true),
                        require(),
                    ]),
                ),
                ("value", noop()),
            ],
            UnlistedPolicy::Reject,
        ),
        require(),
    ])
});

/// Validate a response body against the envelope contract and extract its
/// `value` payload.
pub fn extract_value(endpoint: &str, body: Value) -> Result<Value, StoreError> {
    let outcome = ENVELOPE_SCHEMA.apply(body, &Context::new());
    if let Some(error) = outcome.error {
        return Err(StoreError::InvalidEnvelope {
            endpoint: endpoint.to_string(),
            detail: error.to_value().to_string(),
        });
    }
    let mut envelope = match outcome.value {
        Value::Object(map) => map,
        other => {
            return Err(StoreError::InvalidEnvelope {
                endpoint: endpoint.to_string(),
                detail: format!("envelope is not an object: {other}"),
            })
        }
    };
    Ok(envelope.remove("value").unwrap_or(Value::Null))
}
