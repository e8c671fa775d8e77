//! # Stdin Message Feed
//!
//! Thin adapter from standard input to the [`MessageFeed`] contract: one
//! JSON object per line, `{"topic": "...", "payload": {...}}`. Whatever
//! tails the message bus pipes events in; malformed lines are logged and
//! skipped.

use std::future::Future;

use curator_reconcile::{FeedMessage, MessageFeed};
use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Debug, Deserialize)]
struct RawMessage {
    topic: String,
    #[serde(default)]
    payload: Value,
}

/// Reads newline-delimited JSON messages from stdin.
pub struct StdinFeed {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinFeed {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl MessageFeed for StdinFeed {
    fn next_message(&mut self) -> impl Future<Output = Option<FeedMessage>> + Send {
        async move {
            loop {
                match self.lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<RawMessage>(&line) {
                            Ok(raw) => {
                                return Some(FeedMessage {
                                    topic: raw.topic,
                                    payload: raw.payload,
                                })
                            }
                            Err(error) => {
                                tracing::warn!(%error, "skipping malformed feed line");
                            }
                        }
                    }
                    Ok(None) => return None,
                    Err(error) => {
                        tracing::error!(%error, "feed read failed");
                        return None;
                    }
                }
            }
        }
    }
}
