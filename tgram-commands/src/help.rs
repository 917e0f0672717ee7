//! The built-in `/help` command.

use std::sync::Arc;

use async_trait::async_trait;
use tgram_core::{Bot, HandlerError, Message};

use crate::command::{Command, CommandFlags, CommandHandler};
use crate::registry::CommandRegistry;

/// Replies with the registry's help listing, optionally preceded by a
/// bot-specific preamble. Registered under the name `help` by the polling
/// runner; embedding applications can register it themselves when they drive
/// the stream manually.
pub struct HelpCommand {
    registry: Arc<CommandRegistry>,
    bot: Arc<dyn Bot>,
    preamble: Option<String>,
}

impl HelpCommand {
    pub fn new(
        registry: Arc<CommandRegistry>,
        bot: Arc<dyn Bot>,
        preamble: Option<String>,
    ) -> Self {
        Self {
            registry,
            bot,
            preamble,
        }
    }

    /// Wraps this handler in its `Command` definition.
    pub fn into_command(self) -> Command {
        Command::new(
            "help",
            "Shows this help page.",
            CommandFlags::empty(),
            Arc::new(self),
        )
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn handle(&self, message: Message) -> Result<(), HandlerError> {
        let listing = self.registry.help(message.is_group());
        let text = match &self.preamble {
            Some(preamble) => format!("{}\n\n{}", preamble, listing),
            None => listing,
        };

        self.bot
            .reply_to(&message, &text)
            .await
            .map_err(|e| HandlerError::Failed(e.to_string()))
    }
}
