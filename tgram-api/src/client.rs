//! HTTP client for the Bot API.
//!
//! Every method is a POST to `{api_url}/bot{token}/{method}`: scalar parameters
//! go as a urlencoded form, photo upload as multipart. Responses are decoded
//! through the [`ApiResponse`] envelope; `ok: false` becomes [`TgramError::Api`].

use serde::de::DeserializeOwned;
use tgram_core::{Result, TgramError};
use tracing::debug;

use crate::types::{ApiResponse, ChatAction, Message, Update, User};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Parameters for sendMessage. `chat_id` and `text` are required, the rest is
/// optional and omitted from the form when unset.
#[derive(Debug, Clone)]
pub struct SendMessage {
    pub chat_id: i64,
    pub text: String,
    pub disable_web_page_preview: bool,
    pub reply_to_message_id: Option<i64>,
}

impl SendMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            disable_web_page_preview: false,
            reply_to_message_id: None,
        }
    }
}

/// Bot API client bound to one bot token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    token: String,
    api_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("token", &mask_token(&self.token))
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl ApiClient {
    /// Creates a client against the production Bot API.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Creates a client against a custom API base URL (local API server, tests).
    pub fn with_api_url(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");
        Self {
            http,
            token: token.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Posts a urlencoded form and decodes the envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: &[(&str, String)],
    ) -> Result<T> {
        debug!(method = method, token = %mask_token(&self.token), "Bot API request");

        let response = self
            .http
            .post(self.endpoint(method))
            .form(params)
            .send()
            .await
            .map_err(|e| TgramError::Transport(e.to_string()))?;

        Self::decode(method, response).await
    }

    async fn decode<T: DeserializeOwned>(
        method: &'static str,
        response: reqwest::Response,
    ) -> Result<T> {
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| TgramError::Transport(format!("{}: {}", method, e)))?;

        if !envelope.ok {
            return Err(TgramError::Api {
                code: envelope.error_code.unwrap_or(0),
                description: envelope.description.unwrap_or_default(),
            });
        }

        envelope
            .result
            .ok_or_else(|| TgramError::Transport(format!("{}: ok response without result", method)))
    }

    /// getMe: the authenticated bot's own identity.
    pub async fn get_me(&self) -> Result<User> {
        self.call("getMe", &[]).await
    }

    /// getUpdates: long-polls for updates with id >= `offset`. An empty vec
    /// means the poll timed out with nothing new.
    pub async fn get_updates(
        &self,
        offset: i64,
        limit: Option<u8>,
        timeout_secs: Option<u32>,
    ) -> Result<Vec<Update>> {
        let mut params = vec![("offset", offset.to_string())];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(timeout) = timeout_secs {
            params.push(("timeout", timeout.to_string()));
        }

        self.call("getUpdates", &params).await
    }

    /// sendMessage: delivers a text message, returning the sent message.
    pub async fn send_message(&self, send: &SendMessage) -> Result<Message> {
        let mut params = vec![
            ("chat_id", send.chat_id.to_string()),
            ("text", send.text.clone()),
            (
                "disable_web_page_preview",
                send.disable_web_page_preview.to_string(),
            ),
        ];
        if let Some(reply_to) = send.reply_to_message_id {
            params.push(("reply_to_message_id", reply_to.to_string()));
        }

        self.call("sendMessage", &params).await
    }

    /// forwardMessage: copies `message_id` from `from_chat_id` into `chat_id`.
    pub async fn forward_message(
        &self,
        chat_id: i64,
        from_chat_id: i64,
        message_id: i64,
    ) -> Result<Message> {
        let params = [
            ("chat_id", chat_id.to_string()),
            ("from_chat_id", from_chat_id.to_string()),
            ("message_id", message_id.to_string()),
        ];

        self.call("forwardMessage", &params).await
    }

    /// sendPhoto with an already-uploaded photo's file id.
    pub async fn send_photo(
        &self,
        chat_id: i64,
        file_id: &str,
        caption: Option<&str>,
        reply_to_message_id: Option<i64>,
    ) -> Result<Message> {
        let mut params = vec![
            ("chat_id", chat_id.to_string()),
            ("photo", file_id.to_string()),
        ];
        if let Some(caption) = caption {
            params.push(("caption", caption.to_string()));
        }
        if let Some(reply_to) = reply_to_message_id {
            params.push(("reply_to_message_id", reply_to.to_string()));
        }

        self.call("sendPhoto", &params).await
    }

    /// sendPhoto with a fresh upload: the bytes go as the multipart `photo`
    /// file part, scalar fields ride along as form fields. The returned
    /// message's `photo` sizes carry the file ids for later re-sends (see
    /// [`crate::types::largest_photo`]).
    pub async fn upload_photo(
        &self,
        chat_id: i64,
        photo: Vec<u8>,
        file_name: &str,
        caption: Option<&str>,
        reply_to_message_id: Option<i64>,
    ) -> Result<Message> {
        let method = "sendPhoto";
        debug!(
            method = method,
            chat_id = chat_id,
            bytes = photo.len(),
            token = %mask_token(&self.token),
            "Bot API multipart upload"
        );

        let part = reqwest::multipart::Part::bytes(photo).file_name(file_name.to_string());
        let mut form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", part);
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }
        if let Some(reply_to) = reply_to_message_id {
            form = form.text("reply_to_message_id", reply_to.to_string());
        }

        let response = self
            .http
            .post(self.endpoint(method))
            .multipart(form)
            .send()
            .await
            .map_err(|e| TgramError::Transport(e.to_string()))?;

        Self::decode(method, response).await
    }

    /// sendSticker with an already-uploaded sticker's file id.
    pub async fn send_sticker(
        &self,
        chat_id: i64,
        file_id: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<Message> {
        let mut params = vec![
            ("chat_id", chat_id.to_string()),
            ("sticker", file_id.to_string()),
        ];
        if let Some(reply_to) = reply_to_message_id {
            params.push(("reply_to_message_id", reply_to.to_string()));
        }

        self.call("sendSticker", &params).await
    }

    /// sendChatAction: advertises e.g. "typing" while a response is prepared.
    pub async fn send_chat_action(&self, chat_id: i64, action: ChatAction) -> Result<()> {
        let params = [
            ("chat_id", chat_id.to_string()),
            ("action", action.as_str().to_string()),
        ];

        let _: bool = self.call("sendChatAction", &params).await?;
        Ok(())
    }
}

/// Masks a token for logging: first 7 and last 4 characters kept, the middle
/// replaced; short tokens collapse entirely.
pub fn mask_token(token: &str) -> String {
    if token.len() <= 11 {
        "***".to_string()
    } else {
        format!(
            "{}***{}",
            &token[..7],
            &token[token.len().saturating_sub(4)..]
        )
    }
}
