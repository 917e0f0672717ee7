//! [`tgram_core::Bot`] implementation over the HTTP client.

use std::sync::Arc;

use async_trait::async_trait;
use tgram_core::{Bot, Chat, Message, Result};

use crate::client::{ApiClient, SendMessage};
use crate::types::ChatAction;

/// Delivers outbound messages through [`ApiClient`]. Replies are threaded onto
/// the original message via `reply_to_message_id`.
pub struct TelegramBotAdapter {
    client: Arc<ApiClient>,
}

impl TelegramBotAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Bot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.client
            .send_message(&SendMessage::new(chat.id, text))
            .await?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let mut send = SendMessage::new(message.chat.id, text);
        send.reply_to_message_id = Some(message.id);
        self.client.send_message(&send).await?;
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.client
            .send_chat_action(chat.id, ChatAction::Typing)
            .await
    }
}
