//! # curator-schema — Declarative Record Schemas
//!
//! One canonical schema per record kind, built from the `curator-convert`
//! combinator library. Schemas are immutable converter trees constructed
//! once at first use (`LazyLock`) and shared by every validation of that
//! kind — they are plain data assembled from library calls, safe to apply
//! from any thread.
//!
//! ## Passes
//!
//! Datasets get two passes: a strict **error** pass, then a **warning**
//! pass over the error pass's output (see [`dataset`]). Organizations and
//! accounts get a single error pass.

pub mod account;
pub mod dataset;
pub mod fragments;
pub mod organization;
pub mod vocab;

pub use account::check_account;
pub use dataset::check_dataset;
pub use organization::check_organization;

use curator_core::{Alerts, RecordKind};
use serde_json::Value;

/// Validate one record of the given kind.
pub fn check_record(kind: RecordKind, record: &Value) -> Alerts {
    match kind {
        RecordKind::Dataset => check_dataset(record),
        RecordKind::Organization => check_organization(record),
        RecordKind::Account => check_account(record),
    }
}
