//! # Record Identity Newtypes
//!
//! Newtype wrappers for the identifiers that cross crate boundaries.
//! These prevent accidental identifier confusion — a draft marker can
//! never be mistaken for a record id, and an author tag is not just any
//! string.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CuratorError;

/// Optimistic-concurrency token: identifies the draft a record was fetched
/// at. A publish carrying a stale `DraftId` is rejected by the store with a
/// conflict, which the reconciler absorbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftId(pub Uuid);

impl DraftId {
    /// Generate a new random draft identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from a canonical UUID string.
    pub fn parse(s: &str) -> Result<Self, CuratorError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| CuratorError::InvalidIdentifier(s.to_string()))
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "draft:{}", self.0)
    }
}

/// Identity string tagging which validator owns a sub-tree of a record's
/// shared alert structure. Reconciliation never touches entries published
/// under another author.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author(String);

impl Author {
    /// Wrap a validator identity string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Access the author name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kinds of record Curator validates.
///
/// The wire name (singular, lowercase) is what message-feed topics carry;
/// [`RecordKind::collection`] is the plural path segment the remote store
/// uses in its URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Dataset,
    Organization,
    Account,
}

impl RecordKind {
    /// The singular wire name, as used in feed topics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Dataset => "dataset",
            RecordKind::Organization => "organization",
            RecordKind::Account => "account",
        }
    }

    /// The plural collection segment used in store URLs.
    pub fn collection(&self) -> &'static str {
        match self {
            RecordKind::Dataset => "datasets",
            RecordKind::Organization => "organizations",
            RecordKind::Account => "accounts",
        }
    }
}

impl FromStr for RecordKind {
    type Err = CuratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dataset" => Ok(RecordKind::Dataset),
            "organization" => Ok(RecordKind::Organization),
            "account" => Ok(RecordKind::Account),
            other => Err(CuratorError::UnknownKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
