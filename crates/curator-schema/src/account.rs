//! # Account Schema
//!
//! User accounts: identity, slug, contact address. One pass, error
//! severity.

use std::sync::LazyLock;

use curator_core::Alerts;
use curator_convert::{
    input_to_email, pipe, require, strukt, type_check, Context, Converter, UnlistedPolicy,
    ValueKind,
};
use serde_json::Value;

use crate::fragments::{json_to_iso8601_datetime, json_to_name, json_to_title, json_to_uuid};

/// The account schema: one pass, error severity.
pub static ACCOUNT_SCHEMA: LazyLock<Converter> = LazyLock::new(|| {
    pipe([
        type_check(ValueKind::Object),
        strukt(
            [
                ("id", pipe([json_to_uuid(), require()])),
                ("name", pipe([json_to_name(), require()])),
                ("fullname", json_to_title()),
                ("email", input_to_email()),
                ("created", json_to_iso8601_datetime()),
            ],
            UnlistedPolicy::Keep,
        ),
    ])
});

/// Validate an account record.
pub fn check_account(account: &Value) -> Alerts {
    let outcome = ACCOUNT_SCHEMA.apply(account.clone(), &Context::new());
    Alerts::errors(outcome.error)
}
