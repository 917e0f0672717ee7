//! Wire types mirroring the Bot API JSON payloads.
//!
//! Every method's response arrives wrapped in [`ApiResponse`]; the interesting
//! payload sits in `result`. Absent fields deserialize to `None`/defaults.

use serde::{Deserialize, Serialize};

/// Response envelope common to every Bot API method.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub error_code: Option<i64>,
    pub description: Option<String>,
}

/// One update from getUpdates. `update_id` is the poll cursor's value space.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

/// Chat as the API reports it: the same object for private chats (user fields
/// set) and groups (title set, username absent).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Chat {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub title: Option<String>,
}

/// Message as returned by almost every method.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub date: i64,
    pub chat: Chat,
    pub forward_from: Option<User>,
    pub forward_date: Option<i64>,
    pub reply_to_message: Option<Box<Message>>,
    pub text: Option<String>,
    pub audio: Option<Audio>,
    pub document: Option<Document>,
    pub photo: Vec<PhotoSize>,
    pub sticker: Option<Sticker>,
    pub video: Option<Video>,
    pub contact: Option<Contact>,
    pub location: Option<Location>,
    pub new_chat_participant: Option<User>,
    pub left_chat_participant: Option<User>,
    pub new_chat_title: Option<String>,
    pub new_chat_photo: Option<String>,
    pub delete_chat_photo: bool,
    pub group_chat_created: bool,
}

/// One rendition of a photo; uploads come back as several sizes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: i64,
    pub height: i64,
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Audio {
    pub file_id: String,
    pub duration: i64,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub file_id: String,
    #[serde(rename = "thumb")]
    pub thumbnail: Option<PhotoSize>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sticker {
    pub file_id: String,
    pub width: i64,
    pub height: i64,
    #[serde(rename = "thumb")]
    pub thumbnail: Option<PhotoSize>,
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    pub file_id: String,
    pub width: i64,
    pub height: i64,
    pub duration: i64,
    #[serde(rename = "thumb")]
    pub thumbnail: Option<PhotoSize>,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub phone_number: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

/// Chat action advertised by sendChatAction while the bot prepares a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordAudio,
    UploadAudio,
    UploadDocument,
    FindLocation,
}

impl ChatAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatAction::Typing => "typing",
            ChatAction::UploadPhoto => "upload_photo",
            ChatAction::RecordVideo => "record_video",
            ChatAction::UploadVideo => "upload_video",
            ChatAction::RecordAudio => "record_audio",
            ChatAction::UploadAudio => "upload_audio",
            ChatAction::UploadDocument => "upload_document",
            ChatAction::FindLocation => "find_location",
        }
    }
}

/// Picks the largest rendition by pixel area. Uploads return several sizes;
/// callers keep the biggest one's `file_id` for re-sending.
pub fn largest_photo(photos: &[PhotoSize]) -> Option<&PhotoSize> {
    photos.iter().max_by_key(|p| p.width * p.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decodes_result() {
        let json = r#"{"ok":true,"result":{"id":7,"first_name":"My Bot","username":"mybot"}}"#;
        let resp: ApiResponse<User> = serde_json::from_str(json).unwrap();
        assert!(resp.ok);
        let user = resp.result.unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username.as_deref(), Some("mybot"));
    }

    #[test]
    fn test_envelope_decodes_error() {
        let json = r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#;
        let resp: ApiResponse<User> = serde_json::from_str(json).unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.error_code, Some(401));
        assert_eq!(resp.description.as_deref(), Some("Unauthorized"));
        assert!(resp.result.is_none());
    }

    #[test]
    fn test_message_decodes_with_absent_fields() {
        let json = r#"{"message_id":42,"date":1,"chat":{"id":9,"username":"alice"},"text":"hi"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.message_id, 42);
        assert_eq!(msg.text.as_deref(), Some("hi"));
        assert!(msg.photo.is_empty());
        assert!(msg.from.is_none());
        assert!(!msg.group_chat_created);
    }

    #[test]
    fn test_largest_photo_picks_by_area() {
        let photos = vec![
            PhotoSize {
                file_id: "small".to_string(),
                width: 90,
                height: 90,
                file_size: None,
            },
            PhotoSize {
                file_id: "big".to_string(),
                width: 800,
                height: 600,
                file_size: None,
            },
            PhotoSize {
                file_id: "medium".to_string(),
                width: 320,
                height: 240,
                file_size: None,
            },
        ];
        assert_eq!(largest_photo(&photos).unwrap().file_id, "big");
        assert!(largest_photo(&[]).is_none());
    }
}
