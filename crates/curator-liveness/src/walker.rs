//! # Record URL Walker
//!
//! Probes every URL-bearing field of a dataset — the record's own `url`,
//! each related document's `url` and `image_url`, and each resource's
//! `url` — and assembles the verdicts into an index-keyed error tree with
//! the same shape as the record.

use curator_core::{ErrorTree, NodeBuilder};
use serde_json::Value;

use crate::probe::UrlProbe;

/// Probe one optional field value, returning the error leaf if any.
async fn probe_field(probe: &UrlProbe, value: Option<&Value>) -> Option<ErrorTree> {
    let url = value.and_then(Value::as_str)?;
    probe.verdict(url).await.map(ErrorTree::leaf)
}

/// Check the liveness of every URL a dataset carries.
///
/// Returns `None` when every present URL is alive. Absent URL fields are
/// skipped — presence is the schema passes' concern, not this one's.
pub async fn check_dataset_urls(probe: &UrlProbe, dataset: &Value) -> Option<ErrorTree> {
    let mut root = NodeBuilder::new();

    root.insert("url", probe_field(probe, dataset.get("url")).await);

    let mut related_errors = NodeBuilder::new();
    if let Some(related) = dataset.get("related").and_then(Value::as_array) {
        for (index, link) in related.iter().enumerate() {
            let mut link_errors = NodeBuilder::new();
            link_errors.insert("image_url", probe_field(probe, link.get("image_url")).await);
            link_errors.insert("url", probe_field(probe, link.get("url")).await);
            related_errors.insert_index(index, link_errors.finish());
        }
    }
    root.insert("related", related_errors.finish());

    let mut resource_errors = NodeBuilder::new();
    if let Some(resources) = dataset.get("resources").and_then(Value::as_array) {
        for (index, resource) in resources.iter().enumerate() {
            let mut entry_errors = NodeBuilder::new();
            entry_errors.insert("url", probe_field(probe, resource.get("url")).await);
            resource_errors.insert_index(index, entry_errors.finish());
        }
    }
    root.insert("resources", resource_errors.finish());

    root.finish()
}
