//! # Bounded Worker Pool
//!
//! Distributes record checks from the message feed across a fixed number
//! of workers. Back-pressure is a blocking bounded queue: the feed reader
//! awaits a free permit before spawning the next check, so a slow pool
//! slows the reader instead of piling up work.
//!
//! Each worker handles exactly one record end-to-end; the only state
//! shared between workers is the liveness verdict cache inside the
//! validator.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use curator_store::ObjectStore;

use crate::engine::Reconciler;
use crate::feed::{FeedAction, MessageFeed, TopicFilter};
use crate::validate::Validate;

/// Consume the feed until it ends, reconciling each create/update event
/// for a known record kind on a pool of `workers` tasks.
pub async fn run_feed<S, V, F>(
    reconciler: Arc<Reconciler<S, V>>,
    mut feed: F,
    filter: TopicFilter,
    workers: usize,
) where
    S: ObjectStore + 'static,
    V: Validate + 'static,
    F: MessageFeed,
{
    let permits = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();

    while let Some(message) = feed.next_message().await {
        let Some((kind, action)) = filter.parse(&message.topic) else {
            tracing::debug!(topic = %message.topic, "ignoring message");
            continue;
        };
        match action {
            FeedAction::Create | FeedAction::Update => {}
            FeedAction::Delete => {
                tracing::debug!(topic = %message.topic, "nothing to reconcile on delete");
                continue;
            }
        }

        // Blocking bounded back-pressure: wait for a free worker slot.
        let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
            break;
        };
        let reconciler = Arc::clone(&reconciler);
        tasks.spawn(async move {
            let _permit = permit;
            let payload = message.payload;
            if let Err(error) = reconciler.reconcile_fetched(kind, &payload).await {
                tracing::error!(kind = %kind, %error, "record check failed");
            }
        });

        // Reap finished workers without blocking the reader.
        while tasks.try_join_next().is_some() {}
    }

    while tasks.join_next().await.is_some() {}
}
