//! Message, kind, and direction types for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, context::Context, user::User};

/// Direction of the message (from user or from bot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// Payload category of a message. Service covers chat-membership and chat-photo
/// events (participants joining or leaving, title or photo changes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Text,
    Photo,
    Sticker,
    Document,
    Audio,
    Video,
    Contact,
    Location,
    Service,
}

/// A single message with user, chat, text, and the per-invocation [`Context`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub user: User,
    pub chat: Chat,
    pub text: String,
    pub kind: MessageKind,
    pub direction: MessageDirection,
    pub date: DateTime<Utc>,
    pub reply_to_message_id: Option<i64>,
    /// Handler-scoped scratch space; never serialized or persisted.
    #[serde(skip, default)]
    pub context: Context,
}

impl Message {
    /// True when this message took place inside a group chat.
    pub fn is_group(&self) -> bool {
        self.chat.is_group()
    }

    /// True for a human-saying-stuff message: plain text, not a reply, no
    /// attachment or service payload.
    pub fn is_chat(&self) -> bool {
        self.kind == MessageKind::Text && self.reply_to_message_id.is_none()
    }
}
