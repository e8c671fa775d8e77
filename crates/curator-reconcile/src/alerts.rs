//! # Published-Alert Extraction
//!
//! A record's shared `alerts` structure is keyed severity → author →
//! `{"error": <tree>}`. Exactly one authority owns each author's sub-tree;
//! reconciliation reads only its own entries and never touches another
//! author's when the store merges the published update in.

use curator_core::{Alerts, Author, ErrorTree, Severity};
use serde_json::Value;

/// Extract the alert trees previously published under `author` from a
/// fetched record. Missing, foreign-author, or empty entries read as
/// clear.
pub fn published_for_author(record: &Value, author: &Author) -> Alerts {
    Alerts {
        error: severity_tree(record, Severity::Error, author),
        warning: severity_tree(record, Severity::Warning, author),
    }
}

fn severity_tree(record: &Value, severity: Severity, author: &Author) -> Option<ErrorTree> {
    let entry = record
        .get("alerts")?
        .get(severity.as_str())?
        .get(author.as_str())?
        .get("error")?;
    if entry.is_null() {
        return None;
    }
    let tree: ErrorTree = serde_json::from_value(entry.clone()).ok()?;
    normalize(tree)
}

/// An empty node carries no information; treat it as clear so a tree the
/// store serialized as `{}` compares equal to "no alerts".
fn normalize(tree: ErrorTree) -> Option<ErrorTree> {
    match tree {
        ErrorTree::Node(children) if children.is_empty() => None,
        other => Some(other),
    }
}
