//! Adapters from Bot API wire types to tgram_core types.
//! Depends only on the wire type definitions and tgram_core.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tgram_core::{
    Chat, Context, InboundUpdate, Message, MessageDirection, MessageKind, Result, ToCoreMessage,
    ToCoreUser, UpdateSource, User,
};

use crate::client::ApiClient;
use crate::types;

/// getUpdates long-poll timeout used by the poll loop.
pub(crate) const POLL_TIMEOUT_SECS: u32 = 30;

/// Wraps a wire User for conversion to core [`User`].
pub struct ApiUserWrapper<'a>(pub &'a types::User);

impl<'a> ToCoreUser for ApiUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id,
            username: self.0.username.clone(),
            first_name: self.0.first_name.clone(),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a wire Message for conversion to core [`Message`].
pub struct ApiMessageWrapper<'a>(pub &'a types::Message);

impl<'a> ToCoreMessage for ApiMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.message_id,
            user: self
                .0
                .from
                .as_ref()
                .map(|u| ApiUserWrapper(u).to_core())
                .unwrap_or_default(),
            chat: Chat {
                id: self.0.chat.id,
                username: self.0.chat.username.clone(),
                title: self.0.chat.title.clone(),
                first_name: self.0.chat.first_name.clone(),
                last_name: self.0.chat.last_name.clone(),
            },
            text: self.0.text.clone().unwrap_or_default(),
            kind: message_kind(self.0),
            direction: MessageDirection::Incoming,
            date: DateTime::from_timestamp(self.0.date, 0).unwrap_or_else(Utc::now),
            reply_to_message_id: self.0.reply_to_message.as_ref().map(|m| m.message_id),
            context: Context::new(),
        }
    }
}

/// Derives the payload category from which wire fields are present.
fn message_kind(msg: &types::Message) -> MessageKind {
    if msg.delete_chat_photo
        || msg.group_chat_created
        || msg.new_chat_title.is_some()
        || msg.new_chat_photo.is_some()
        || msg.new_chat_participant.is_some()
        || msg.left_chat_participant.is_some()
    {
        MessageKind::Service
    } else if !msg.photo.is_empty() {
        MessageKind::Photo
    } else if msg.sticker.is_some() {
        MessageKind::Sticker
    } else if msg.document.is_some() {
        MessageKind::Document
    } else if msg.audio.is_some() {
        MessageKind::Audio
    } else if msg.video.is_some() {
        MessageKind::Video
    } else if msg.contact.is_some() {
        MessageKind::Contact
    } else if msg.location.is_some() {
        MessageKind::Location
    } else {
        MessageKind::Text
    }
}

/// The client itself is the poll loop's update source: fetch everything after
/// the cursor and adapt to core messages. Updates without a message payload
/// (e.g. future API update kinds) still advance the cursor but carry nothing
/// to dispatch, so they are skipped here.
#[async_trait]
impl UpdateSource for ApiClient {
    async fn fetch_after(&self, cursor: i64) -> Result<Vec<InboundUpdate>> {
        let updates = self
            .get_updates(cursor + 1, None, Some(POLL_TIMEOUT_SECS))
            .await?;

        Ok(updates
            .iter()
            .filter_map(|update| {
                update.message.as_ref().map(|message| InboundUpdate {
                    id: update.update_id,
                    message: ApiMessageWrapper(message).to_core(),
                })
            })
            .collect())
    }
}
