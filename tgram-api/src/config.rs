//! Minimal runtime config: token, API URL override, log path.
//! Loaded from the environment: BOT_TOKEN, TELEGRAM_API_URL, LOG_FILE.

use anyhow::Result;
use std::env;

/// Connection config for a bot process (Telegram access and logging only).
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl TelegramConfig {
    /// Loads from the environment: BOT_TOKEN required, TELEGRAM_API_URL and
    /// LOG_FILE optional.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let telegram_api_url = env::var("TELEGRAM_API_URL").ok();
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Builds with the given token, everything else unset.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
        }
    }

    /// Builds the API client this config describes.
    pub fn client(&self) -> crate::ApiClient {
        match &self.telegram_api_url {
            Some(url) => crate::ApiClient::with_api_url(self.bot_token.clone(), url.clone()),
            None => crate::ApiClient::new(self.bot_token.clone()),
        }
    }
}
