//! # curator-reconcile — The Reconciliation Engine
//!
//! Compares a freshly computed alert tree against the one previously
//! published for this validator's author, and issues an update only on
//! change, honoring the store's optimistic-concurrency conflict signal.
//!
//! ## Per-record state machine
//!
//! ```text
//! idle ─fetch─▶ fetched ─validate─▶ validated ─┬─unchanged──▶ idle
//!                                              └─publish-pending─▶ { published | conflicted | failed } ─▶ idle
//! ```
//!
//! No state persists between records and there is no retry state: a
//! conflict is absorbed silently, any other publish failure is terminal
//! for that record's cycle but never for the enclosing batch. Recovery is
//! the next poll/event cycle.
//!
//! ## Execution shapes
//!
//! [`Reconciler::sweep`] walks an entire collection sequentially;
//! [`run_feed`] consumes an ordered message feed and distributes record
//! checks across a bounded worker pool with blocking backpressure.

pub mod alerts;
pub mod engine;
pub mod error;
pub mod feed;
pub mod notify;
pub mod pool;
pub mod validate;

pub use alerts::published_for_author;
pub use engine::{Reconciler, RecordOutcome, SweepReport};
pub use error::ReconcileError;
pub use feed::{FeedAction, FeedMessage, MessageFeed, TopicFilter};
pub use notify::{notify_all, DeliveryError, DeliveryReport, NotificationSink, RenderedMessage};
pub use pool::run_feed;
pub use validate::{LivenessValidator, SchemaValidator, Validate};
