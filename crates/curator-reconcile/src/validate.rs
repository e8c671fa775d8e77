//! # Validator Seam
//!
//! The reconciler is generic over *what* computes a record's fresh alerts.
//! Two validators exist: the pure schema passes, and the URL-liveness
//! probe. Each runs as its own author, owning its own sub-tree of the
//! shared alert structure.

use std::future::Future;

use curator_core::{Alerts, RecordKind};
use curator_liveness::{check_dataset_urls, UrlProbe};
use serde_json::Value;

/// Computes the fresh alerts for one fetched record.
pub trait Validate: Send + Sync {
    /// Validate one record of the given kind.
    fn validate(
        &self,
        kind: RecordKind,
        record: &Value,
    ) -> impl Future<Output = Alerts> + Send;
}

/// The declarative schema passes — pure, no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl Validate for SchemaValidator {
    fn validate(
        &self,
        kind: RecordKind,
        record: &Value,
    ) -> impl Future<Output = Alerts> + Send {
        let alerts = curator_schema::check_record(kind, record);
        async move { alerts }
    }
}

/// The URL-liveness sub-validator. Only datasets carry URLs to probe;
/// other kinds read as clear.
#[derive(Debug, Clone)]
pub struct LivenessValidator {
    probe: UrlProbe,
}

impl LivenessValidator {
    /// Wrap a probe (and its shared verdict cache).
    pub fn new(probe: UrlProbe) -> Self {
        Self { probe }
    }
}

impl Validate for LivenessValidator {
    fn validate(
        &self,
        kind: RecordKind,
        record: &Value,
    ) -> impl Future<Output = Alerts> + Send {
        async move {
            match kind {
                RecordKind::Dataset => {
                    Alerts::errors(check_dataset_urls(&self.probe, record).await)
                }
                RecordKind::Organization | RecordKind::Account => Alerts::none(),
            }
        }
    }
}
