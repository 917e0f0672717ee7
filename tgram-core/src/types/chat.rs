//! Chat identity type for core messages.

use serde::{Deserialize, Serialize};

/// Chat identity. The API returns the same object for private chats and groups;
/// a private chat carries the peer's `username`, a group carries a `title`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub username: Option<String>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Chat {
    /// True when this chat is a group: the per-user `username` field is absent.
    pub fn is_group(&self) -> bool {
        self.username.as_deref().map_or(true, |u| u.is_empty())
    }
}
