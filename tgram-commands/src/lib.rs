//! # tgram-commands
//!
//! Command framework for the bot: [`Command`] definitions with [`CommandFlags`],
//! first-match-wins lookup over an append-only [`CommandRegistry`], help-text
//! rendering, and a [`Dispatcher`] that runs the matched handler on its own task
//! and shields the caller from handler failures.

pub mod command;
pub mod dispatcher;
pub mod help;
pub mod registry;

pub use command::{Command, CommandFlags, CommandHandler};
pub use dispatcher::Dispatcher;
pub use help::HelpCommand;
pub use registry::CommandRegistry;
