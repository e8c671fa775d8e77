//! # The Reconciler
//!
//! Runs the per-record state machine: validate the fetched record, compare
//! the fresh alerts with the trees previously published under this
//! validator's author, publish only on change, absorb conflicts. A sweep
//! drives the machine over an entire collection; failures are terminal for
//! the record, never for the batch.

use curator_core::{Author, DraftId, RecordKind};
use curator_store::{AlertsUpdate, ObjectStore, PublishOutcome};
use serde_json::Value;

use crate::alerts::published_for_author;
use crate::error::ReconcileError;
use crate::validate::Validate;

/// How one record's cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Fresh alerts equal the published ones; no write was issued.
    Unchanged,
    /// The store accepted the new alert trees.
    Published,
    /// The record changed between fetch and publish; abandoned silently.
    Conflicted,
}

/// Counters for one poll-all sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub checked: usize,
    pub unchanged: usize,
    pub published: usize,
    pub conflicted: usize,
    pub failed: usize,
}

/// The reconciliation engine for one validator identity.
#[derive(Debug, Clone)]
pub struct Reconciler<S, V> {
    store: S,
    validator: V,
    author: Author,
}

impl<S, V> Reconciler<S, V>
where
    S: ObjectStore,
    V: Validate,
{
    /// Assemble an engine from its collaborators. The author tags every
    /// published sub-tree; one authority per author.
    pub fn new(store: S, validator: V, author: Author) -> Self {
        Self {
            store,
            validator,
            author,
        }
    }

    /// The validator identity this engine publishes under.
    pub fn author(&self) -> &Author {
        &self.author
    }

    /// The underlying store (tests observe spy stores through this).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one already-fetched record through validate → normalize →
    /// compare → publish.
    pub async fn reconcile_fetched(
        &self,
        kind: RecordKind,
        record: &Value,
    ) -> Result<RecordOutcome, ReconcileError> {
        let id = required_str(record, "id")?;
        let name = record.get("name").and_then(Value::as_str).unwrap_or(id);
        tracing::debug!(kind = %kind, name, "checking record");

        let fresh = self.validator.validate(kind, record).await;
        let published = published_for_author(record, &self.author);
        if fresh == published {
            return Ok(RecordOutcome::Unchanged);
        }

        let draft_id = DraftId::parse(required_str(record, "draft_id")?).map_err(|_| {
            ReconcileError::MalformedRecord {
                reason: "draft_id is not a canonical UUID".to_string(),
            }
        })?;
        tracing::info!(kind = %kind, name, "updating record alerts");
        let update = AlertsUpdate {
            author: self.author.clone(),
            draft_id,
            alerts: fresh,
        };
        match self.store.publish_alerts(kind, id, &update).await? {
            PublishOutcome::Updated => Ok(RecordOutcome::Published),
            PublishOutcome::Conflict => {
                tracing::info!(kind = %kind, name, "record modified since fetch, alerts ignored");
                Ok(RecordOutcome::Conflicted)
            }
        }
    }

    /// Fetch one record by id and reconcile it.
    pub async fn reconcile_by_id(
        &self,
        kind: RecordKind,
        id: &str,
    ) -> Result<RecordOutcome, ReconcileError> {
        let record = self.store.get_record(kind, id).await?;
        self.reconcile_fetched(kind, &record).await
    }

    /// Poll-all mode: list the collection and reconcile every record in
    /// turn. A record's failure is logged and the sweep moves on; only a
    /// failure to list the collection aborts the sweep itself.
    pub async fn sweep(&self, kind: RecordKind) -> Result<SweepReport, ReconcileError> {
        let ids = self.store.list_ids(kind).await?;
        tracing::info!(kind = %kind, count = ids.len(), "sweeping collection");

        let mut report = SweepReport::default();
        for id in &ids {
            report.checked += 1;
            match self.reconcile_by_id(kind, id).await {
                Ok(RecordOutcome::Unchanged) => report.unchanged += 1,
                Ok(RecordOutcome::Published) => report.published += 1,
                Ok(RecordOutcome::Conflicted) => report.conflicted += 1,
                Err(error) => {
                    report.failed += 1;
                    tracing::error!(kind = %kind, id = %id, %error, "record check failed");
                }
            }
        }
        Ok(report)
    }
}

fn required_str<'a>(record: &'a Value, field: &str) -> Result<&'a str, ReconcileError> {
    record
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ReconcileError::MalformedRecord {
            reason: format!("missing string field {field:?}"),
        })
}
