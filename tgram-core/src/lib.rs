//! # tgram-core
//!
//! Core types and traits for the Telegram bot binding: the [`Bot`] and [`UpdateSource`]
//! capability traits, message/chat/user types, the per-message [`Context`] store,
//! error types, and tracing initialization. Transport-agnostic; used by
//! tgram-commands and tgram-api.

pub mod bot;
pub mod convert;
pub mod error;
pub mod logger;
pub mod source;
pub mod types;

pub use bot::Bot;
pub use convert::{ToCoreMessage, ToCoreUser};
pub use error::{HandlerError, Result, TgramError};
pub use logger::init_tracing;
pub use source::{InboundUpdate, UpdateSource};
pub use types::{Chat, Context, Message, MessageDirection, MessageKind, User};
