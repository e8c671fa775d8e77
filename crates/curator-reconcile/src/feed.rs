//! # Message Feed Contract
//!
//! The event-driven mode consumes an ordered stream of `(topic, payload)`
//! messages where the topic encodes
//! `{prefix}.{environment}.{domain}.{kind}.{action}`. The consumer itself
//! is a single sequential reader; fan-out happens behind it (see
//! [`crate::pool`]).

use std::future::Future;

use curator_core::RecordKind;
use serde_json::Value;

/// A record lifecycle action carried by a feed topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedAction {
    Create,
    Update,
    Delete,
}

impl FeedAction {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "create" => Some(FeedAction::Create),
            "update" => Some(FeedAction::Update),
            "delete" => Some(FeedAction::Delete),
            _ => None,
        }
    }
}

/// One message from the feed: the raw topic and the changed object.
#[derive(Debug, Clone)]
pub struct FeedMessage {
    pub topic: String,
    pub payload: Value,
}

/// An ordered feed of record-change events.
pub trait MessageFeed: Send {
    /// The next message, or `None` when the feed ends.
    fn next_message(&mut self) -> impl Future<Output = Option<FeedMessage>> + Send;
}

/// Accepts topics under one `{prefix}.{environment}.{domain}.` namespace
/// and decodes their `{kind}.{action}` tail.
#[derive(Debug, Clone)]
pub struct TopicFilter {
    expected_prefix: String,
}

impl TopicFilter {
    /// Build a filter for one namespace. The prefix itself may contain
    /// dots (`org.example`); only the kind and action segments are parsed
    /// out of the tail.
    pub fn new(prefix: &str, environment: &str, domain: &str) -> Self {
        Self {
            expected_prefix: format!("{prefix}.{environment}.{domain}."),
        }
    }

    /// Decode a topic. Returns `None` for foreign namespaces, unknown
    /// kinds, and unknown actions.
    pub fn parse(&self, topic: &str) -> Option<(RecordKind, FeedAction)> {
        let tail = topic.strip_prefix(&self.expected_prefix)?;
        let (kind, action) = tail.split_once('.')?;
        if action.contains('.') {
            return None;
        }
        let kind = kind.parse::<RecordKind>().ok()?;
        let action = FeedAction::from_str(action)?;
        Some((kind, action))
    }
}
