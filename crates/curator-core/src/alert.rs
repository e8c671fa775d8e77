//! # Alert Severities
//!
//! A validation pass produces up to two trees per record: **errors**
//! (must-fix schema violations) and **warnings** (softer requirements).
//! [`Alerts`] pairs them; the reconciler publishes the pair under this
//! validator's author name and compares it against what the store already
//! holds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tree::ErrorTree;

/// Alert severity level, as keyed in the remote store's alert structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// The wire name of this severity (`"error"` / `"warning"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The freshly computed alert trees for one record, from one author.
///
/// Absent severities are omitted from the serialized form entirely — a
/// record with no violations publishes as an empty object, which is what
/// "no alerts" compares equal to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alerts {
    /// Must-fix schema violations.
    pub error: Option<ErrorTree>,
    /// Softer requirements.
    pub warning: Option<ErrorTree>,
}

impl Alerts {
    /// Alerts with neither errors nor warnings.
    pub fn none() -> Self {
        Self::default()
    }

    /// Alerts carrying only an error tree.
    pub fn errors(tree: Option<ErrorTree>) -> Self {
        Self {
            error: tree,
            warning: None,
        }
    }

    /// Whether both severities are clear.
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.warning.is_none()
    }

    /// The tree for one severity.
    pub fn get(&self, severity: Severity) -> Option<&ErrorTree> {
        match severity {
            Severity::Error => self.error.as_ref(),
            Severity::Warning => self.warning.as_ref(),
        }
    }

    /// Serialize as `{"error": …, "warning": …}`, omitting clear severities.
    ///
    /// Sequence indices inside the trees are already string keys, so the
    /// result is the canonical JSON form used for before/after comparison.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(tree) = &self.error {
            map.insert(Severity::Error.as_str().to_string(), tree.to_value());
        }
        if let Some(tree) = &self.warning {
            map.insert(Severity::Warning.as_str().to_string(), tree.to_value());
        }
        Value::Object(map)
    }
}
