//! Cursor-driven poll loop: fetch updates newer than the cursor, emit each new
//! message exactly once into a bounded stream.

use std::sync::Arc;
use std::time::Duration;

use tgram_core::{InboundUpdate, Message, Result, UpdateSource};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Bounded queue between the poll loop and the dispatch consumer.
pub const QUEUE_CAPACITY: usize = 100;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);
const MAX_CONSECUTIVE_FAILURES: u32 = 10;

/// Repeatedly fetches updates newer than the cursor and streams the messages.
///
/// The cursor is owned exclusively by the loop task and only ever advances.
/// Fetch failures are retried with bounded exponential backoff; only a run of
/// consecutive failures closes the stream (with the last error), so transient
/// outages never surface downstream.
pub struct UpdatePoller {
    source: Arc<dyn UpdateSource>,
    cursor: i64,
    queue_capacity: usize,
    max_consecutive_failures: u32,
}

impl UpdatePoller {
    pub fn new(source: Arc<dyn UpdateSource>) -> Self {
        Self {
            source,
            cursor: 0,
            queue_capacity: QUEUE_CAPACITY,
            max_consecutive_failures: MAX_CONSECUTIVE_FAILURES,
        }
    }

    /// Starts from a previously seen cursor instead of 0.
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_max_consecutive_failures(mut self, failures: u32) -> Self {
        self.max_consecutive_failures = failures;
        self
    }

    /// Spawns the loop. The receiver yields inbound messages in arrival order;
    /// the handle resolves when the receiver is dropped (Ok) or the source
    /// fails persistently (Err).
    pub fn spawn(self) -> (mpsc::Receiver<Message>, JoinHandle<Result<()>>) {
        let (tx, rx) = mpsc::channel(self.queue_capacity);
        let handle = tokio::spawn(self.run(tx));
        (rx, handle)
    }

    async fn run(mut self, tx: mpsc::Sender<Message>) -> Result<()> {
        let mut backoff = INITIAL_BACKOFF;
        let mut failures: u32 = 0;

        loop {
            match self.source.fetch_after(self.cursor).await {
                Ok(updates) => {
                    failures = 0;
                    backoff = INITIAL_BACKOFF;

                    for message in drain_new(&mut self.cursor, updates) {
                        if tx.send(message).await.is_err() {
                            info!("Message stream receiver dropped, stopping poll loop");
                            return Ok(());
                        }
                    }
                }
                Err(e) => {
                    failures += 1;
                    if failures >= self.max_consecutive_failures {
                        error!(
                            error = %e,
                            failures = failures,
                            "Update fetch failed persistently, closing message stream"
                        );
                        return Err(e);
                    }

                    warn!(
                        error = %e,
                        failures = failures,
                        retry_in_secs = backoff.as_secs(),
                        "Update fetch failed, backing off"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
            }
        }
    }
}

/// Advances the cursor across one fetched batch and returns the messages to
/// emit. Ids at or below the cursor are already seen and dropped; every kept
/// message moves the cursor up to its id.
pub fn drain_new(cursor: &mut i64, updates: Vec<InboundUpdate>) -> Vec<Message> {
    let mut fresh = Vec::new();
    for update in updates {
        if update.id <= *cursor {
            continue;
        }
        *cursor = update.id;
        fresh.push(update.message);
    }
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tgram_core::{Chat, Context, MessageDirection, MessageKind, User};

    fn update(id: i64) -> InboundUpdate {
        InboundUpdate {
            id,
            message: Message {
                id,
                user: User::default(),
                chat: Chat::default(),
                text: format!("msg-{}", id),
                kind: MessageKind::Text,
                direction: MessageDirection::Incoming,
                date: Utc::now(),
                reply_to_message_id: None,
                context: Context::new(),
            },
        }
    }

    #[test]
    fn test_drain_new_drops_seen_and_duplicate_ids() {
        let mut cursor = 4;
        let emitted = drain_new(
            &mut cursor,
            vec![update(5), update(3), update(7), update(7), update(9)],
        );

        let ids: Vec<i64> = emitted.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![5, 7, 9]);
        assert_eq!(cursor, 9);
    }

    #[test]
    fn test_drain_new_empty_batch_keeps_cursor() {
        let mut cursor = 12;
        assert!(drain_new(&mut cursor, vec![]).is_empty());
        assert_eq!(cursor, 12);
    }

    #[test]
    fn test_drain_new_never_moves_cursor_backwards() {
        let mut cursor = 0;
        drain_new(&mut cursor, vec![update(8)]);
        assert_eq!(cursor, 8);
        drain_new(&mut cursor, vec![update(2), update(1)]);
        assert_eq!(cursor, 8);
    }
}
