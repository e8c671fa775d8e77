//! # Notification Fan-Out
//!
//! The notification sink is a collaborator: anything that can deliver a
//! rendered message to one recipient. Fan-out tolerates partial failure —
//! a recipient whose delivery fails is recorded and skipped, never
//! aborting delivery to the rest.

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

/// A message already rendered by the caller (rendering itself is outside
/// this crate's scope).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

/// Failure to deliver to one recipient.
#[derive(Debug, Error)]
#[error("delivery to {recipient} failed: {reason}")]
pub struct DeliveryError {
    pub recipient: String,
    pub reason: String,
}

/// Anything that can deliver a rendered message to one recipient.
pub trait NotificationSink: Send + Sync {
    /// Deliver `message` to `recipient`.
    fn deliver(
        &self,
        recipient: &str,
        message: &RenderedMessage,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

/// What happened across one fan-out.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: Vec<DeliveryError>,
}

impl DeliveryReport {
    /// Whether every recipient received the message.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Deliver one message to every recipient in turn. Per-recipient failures
/// are logged and collected; the remaining recipients still get the
/// message.
pub async fn notify_all<S: NotificationSink>(
    sink: &S,
    recipients: &[String],
    message: &RenderedMessage,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    for recipient in recipients {
        match sink.deliver(recipient, message).await {
            Ok(()) => report.delivered += 1,
            Err(error) => {
                tracing::warn!(%error, "notification delivery failed");
                report.failed.push(error);
            }
        }
    }
    report
}

/// Collect the notification recipients of an organization record: the
/// email of every listed user that has one.
pub fn organization_recipients(organization: &Value) -> Vec<String> {
    organization
        .get("users")
        .and_then(Value::as_array)
        .map(|users| {
            users
                .iter()
                .filter_map(|user| user.get("email").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
