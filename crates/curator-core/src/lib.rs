//! # curator-core — Foundational Types for Curator
//!
//! This crate is the bedrock of the Curator workspace. It defines the types
//! every other crate shares: the [`ErrorTree`] value that carries validation
//! results, alert severities, validated identifier newtypes, and canonical
//! ISO-8601 temporal helpers.
//!
//! ## Key Design Principles
//!
//! 1. **Errors are values.** A schema violation is never an `Err` — it is a
//!    node in an [`ErrorTree`] whose shape mirrors the offending record.
//!    `Result` is reserved for transport and contract failures.
//!
//! 2. **Newtype wrappers for record identifiers.** `DraftId`, `Author`,
//!    `RecordKind` — no bare strings or bare UUIDs cross crate boundaries
//!    where the type matters.
//!
//! 3. **Canonical timestamps.** Dates render as `YYYY-MM-DD` and datetimes
//!    as `YYYY-MM-DDTHH:MM:SSZ`, always UTC, so that two validation passes
//!    over the same record produce byte-identical trees.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `curator-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod alert;
pub mod error;
pub mod identity;
pub mod temporal;
pub mod tree;

// Re-export primary types for ergonomic imports.
pub use alert::{Alerts, Severity};
pub use error::CuratorError;
pub use identity::{Author, DraftId, RecordKind};
pub use tree::{ErrorTree, NodeBuilder};
