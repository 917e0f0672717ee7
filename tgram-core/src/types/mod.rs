//! Core domain types: message, chat, user, and the per-message context store.

pub mod chat;
pub mod context;
pub mod message;
pub mod user;

pub use chat::Chat;
pub use context::Context;
pub use message::{Message, MessageDirection, MessageKind};
pub use user::User;
