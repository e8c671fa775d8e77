//! # curator-store — Remote Object Store Client
//!
//! Typed access to the remote store Curator reconciles against. The store
//! speaks a small JSON API:
//!
//! | Method | Path | Operation |
//! |--------|-------------------------------|--------------------------|
//! | GET    | `/api/1/{kind}s`              | List record ids          |
//! | GET    | `/api/1/{kind}s/{id}`         | Fetch one record         |
//! | POST   | `/api/1/{kind}s/{id}/alert`   | Publish alert trees      |
//!
//! Every response arrives wrapped in a versioned envelope that this crate
//! validates before handing the payload on — a malformed envelope is a
//! contract break with the store, not a per-record condition.
//!
//! Publishing carries the record's `draft_id` as an optimistic-concurrency
//! token. A `409` response means the record changed between fetch and
//! publish; it is reported as [`PublishOutcome::Conflict`], never as an
//! error, and never retried.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;

pub use client::{AlertsUpdate, ObjectStore, PublishOutcome, RemoteStore};
pub use config::StoreConfig;
pub use error::StoreError;
