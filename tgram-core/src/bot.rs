//! Bot abstraction for delivering outbound messages.
//!
//! [`Bot`] is transport-agnostic; tgram-api implements it over the HTTP binding.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Capability for delivering replies. Implementations map to a transport;
/// delivery is fire-and-forget from the caller's perspective.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat, threaded onto it).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Tells the chat the bot is typing a message.
    async fn send_typing(&self, chat: &Chat) -> Result<()>;
}
