//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared across the Curator workspace. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Schema violations are NOT represented here. They are values — leaves of
//!   an [`crate::tree::ErrorTree`] — and flow through converter outcomes.
//! - This hierarchy covers contract breaks: malformed identifiers reaching a
//!   typed constructor, unparseable timestamps, serialization failures.

use thiserror::Error;

/// Top-level error type for the Curator core crate.
#[derive(Error, Debug)]
pub enum CuratorError {
    /// An identifier string did not match its required shape.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A timestamp string could not be parsed as canonical ISO-8601.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A record kind name was not recognized.
    #[error("unknown record kind: {0}")]
    UnknownKind(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
