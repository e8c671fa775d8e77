//! Reconciliation error types.

use thiserror::Error;

/// Errors that terminate one record's cycle (and, for listing failures,
/// one sweep).
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A store call failed.
    #[error(transparent)]
    Store(#[from] curator_store::StoreError),

    /// The fetched record is missing the fields reconciliation itself
    /// needs (`id`, `draft_id`). This is a contract break with the store,
    /// not a schema violation to publish.
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },
}
