//! Inbound update source abstraction consumed by the poll loop.

use crate::error::Result;
use crate::types::Message;
use async_trait::async_trait;

/// One inbound update: the cursor value plus the message it carries.
/// `id` is monotonically increasing on the remote side.
#[derive(Debug, Clone)]
pub struct InboundUpdate {
    pub id: i64,
    pub message: Message,
}

/// Capability for fetching inbound updates newer than a cursor.
/// Long-poll style: an empty vec means the poll timed out with nothing new.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    async fn fetch_after(&self, cursor: i64) -> Result<Vec<InboundUpdate>>;
}
