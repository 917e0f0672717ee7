//! # tgram-api
//!
//! The Telegram Bot HTTP API binding: wire [`types`] mirroring the Bot API JSON,
//! [`ApiClient`] building form/multipart requests over reqwest, adapters to the
//! core model, the cursor-driven [`UpdatePoller`], and the [`run_polling`]
//! entry point that wires the command dispatcher to the message stream.

pub mod adapters;
pub mod bot_adapter;
pub mod client;
pub mod config;
pub mod poller;
pub mod runner;
pub mod types;

pub use adapters::{ApiMessageWrapper, ApiUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use client::{mask_token, ApiClient, SendMessage, DEFAULT_API_URL};
pub use config::TelegramConfig;
pub use poller::UpdatePoller;
pub use runner::{message_stream, run_polling};
pub use types::ChatAction;
