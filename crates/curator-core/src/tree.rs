//! # ErrorTree — Shape-Mirroring Validation Results
//!
//! An [`ErrorTree`] carries the outcome of validating one record. Its shape
//! is always a subset of the record's own shape: a leaf holds the message
//! for a failing scalar field, an internal node maps field names (or
//! sequence indices, rendered as strings) to the trees of failing children.
//!
//! ## Invariants
//!
//! - A node never contains an entry for a child that did not fail. Nodes
//!   with no failing descendant are omitted entirely, not present as empty
//!   maps or null leaves. [`NodeBuilder::finish`] enforces this by
//!   construction — it returns `None` instead of an empty node.
//! - Sequence indices are string keys (`"0"`, `"1"`, …) so a serialized
//!   tree is plain JSON and compares bytewise against a previously
//!   published tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validation error tree: either a leaf message or a mapping from field
/// name / stringified index to the nested tree of a failing child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorTree {
    /// Terminal message for a failing value.
    Leaf(String),
    /// Failing children of an object or sequence node.
    Node(BTreeMap<String, ErrorTree>),
}

impl ErrorTree {
    /// Create a leaf carrying a human-readable message.
    pub fn leaf(message: impl Into<String>) -> Self {
        ErrorTree::Leaf(message.into())
    }

    /// The leaf message, if this tree is a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            ErrorTree::Leaf(message) => Some(message),
            ErrorTree::Node(_) => None,
        }
    }

    /// Look up the subtree for a field name.
    pub fn get(&self, key: &str) -> Option<&ErrorTree> {
        match self {
            ErrorTree::Leaf(_) => None,
            ErrorTree::Node(children) => children.get(key),
        }
    }

    /// Look up the subtree for a sequence index.
    pub fn get_index(&self, index: usize) -> Option<&ErrorTree> {
        self.get(&index.to_string())
    }

    /// Serialize to a JSON value (leaf → string, node → object).
    pub fn to_value(&self) -> Value {
        // Serializing Leaf/Node cannot fail: keys are strings, values are
        // strings or nested nodes.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Whether every key in this tree names a field or index that exists in
    /// `value`. This is the shape-subset invariant the validator guarantees;
    /// exposed so tests and callers can assert it.
    pub fn mirrors_shape_of(&self, value: &Value) -> bool {
        match self {
            ErrorTree::Leaf(_) => true,
            ErrorTree::Node(children) => children.iter().all(|(key, child)| {
                let sub = match value {
                    Value::Object(fields) => fields.get(key),
                    Value::Array(items) => key
                        .parse::<usize>()
                        .ok()
                        .and_then(|index| items.get(index)),
                    // Leaf strings that a converter split further (e.g. a
                    // comma-separated composite) have no JSON substructure;
                    // the sub-tree indexes into the parsed form.
                    Value::String(_) => return true,
                    _ => None,
                };
                match sub {
                    Some(sub) => child.mirrors_shape_of(sub),
                    None => false,
                }
            }),
        }
    }
}

/// Accumulates failing children while converting an object or sequence
/// node, then yields `None` when nothing failed.
#[derive(Debug, Default)]
pub struct NodeBuilder {
    children: BTreeMap<String, ErrorTree>,
}

impl NodeBuilder {
    /// Start an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a child's error under a field name. `None` (the child
    /// succeeded) is ignored, preserving the no-empty-entries invariant.
    pub fn insert(&mut self, key: impl Into<String>, error: Option<ErrorTree>) {
        if let Some(error) = error {
            self.children.insert(key.into(), error);
        }
    }

    /// Record a child's error under a sequence index.
    pub fn insert_index(&mut self, index: usize, error: Option<ErrorTree>) {
        self.insert(index.to_string(), error);
    }

    /// Whether any child has failed so far.
    pub fn has_errors(&self) -> bool {
        !self.children.is_empty()
    }

    /// Finish the node: `None` if no child failed.
    pub fn finish(self) -> Option<ErrorTree> {
        if self.children.is_empty() {
            None
        } else {
            Some(ErrorTree::Node(self.children))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_builder_yields_none() {
        assert_eq!(NodeBuilder::new().finish(), None);
    }

    #[test]
    fn successful_children_leave_no_entries() {
        let mut node = NodeBuilder::new();
        node.insert("title", None);
        node.insert("name", Some(ErrorTree::leaf("String is too long")));
        let tree = node.finish().unwrap();
        assert!(tree.get("title").is_none());
        assert_eq!(tree.get("name").unwrap().as_leaf(), Some("String is too long"));
    }

    #[test]
    fn indices_serialize_as_string_keys() {
        let mut node = NodeBuilder::new();
        node.insert_index(1, Some(ErrorTree::leaf("Invalid territory type")));
        let value = node.finish().unwrap().to_value();
        assert_eq!(value, json!({"1": "Invalid territory type"}));
    }

    #[test]
    fn untagged_deserialize_roundtrip() {
        let value = json!({"resources": {"0": {"url": "Missing value"}}});
        let tree: ErrorTree = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(tree.to_value(), value);
        assert_eq!(
            tree.get("resources")
                .and_then(|t| t.get_index(0))
                .and_then(|t| t.get("url"))
                .and_then(ErrorTree::as_leaf),
            Some("Missing value"),
        );
    }

    #[test]
    fn mirrors_shape_accepts_matching_subset() {
        let record = json!({"name": "x", "resources": [{"url": null}]});
        let mut resources = NodeBuilder::new();
        let mut first = NodeBuilder::new();
        first.insert("url", Some(ErrorTree::leaf("Missing value")));
        resources.insert_index(0, first.finish());
        let mut root = NodeBuilder::new();
        root.insert("resources", resources.finish());
        assert!(root.finish().unwrap().mirrors_shape_of(&record));
    }

    #[test]
    fn mirrors_shape_rejects_unknown_field() {
        let record = json!({"name": "x"});
        let mut root = NodeBuilder::new();
        root.insert("title", Some(ErrorTree::leaf("Missing value")));
        assert!(!root.finish().unwrap().mirrors_shape_of(&record));
    }
}
