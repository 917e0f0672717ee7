//! Polling entry point: resolve the bot identity, wire the dispatcher to the
//! message stream, and consume it until the stream closes.

use std::sync::Arc;

use anyhow::Result;
use tgram_commands::{CommandRegistry, Dispatcher, HelpCommand};
use tgram_core::{Bot, Message};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::bot_adapter::TelegramBotAdapter;
use crate::client::ApiClient;
use crate::poller::UpdatePoller;

/// Spawns the poll loop over `client` and returns the inbound message stream.
/// For embedding applications that consume messages themselves instead of
/// going through [`run_polling`].
pub fn message_stream(
    client: Arc<ApiClient>,
) -> (
    mpsc::Receiver<Message>,
    JoinHandle<tgram_core::Result<()>>,
) {
    UpdatePoller::new(client).spawn()
}

/// Runs the bot: getMe resolves the username used for group-mention matching,
/// the built-in help command is registered (with `help_preamble` above the
/// listing), then every inbound message is matched and dispatched.
///
/// Returns when the message stream closes; a persistent transport failure in
/// the poll loop surfaces as the error.
#[instrument(skip(client, registry, help_preamble))]
pub async fn run_polling(
    client: Arc<ApiClient>,
    registry: Arc<CommandRegistry>,
    help_preamble: Option<String>,
) -> Result<()> {
    let me = client.get_me().await?;
    let bot_username = me.username.clone().unwrap_or_default();

    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(client.clone()));
    registry.add(HelpCommand::new(registry.clone(), bot.clone(), help_preamble).into_command());

    let dispatcher = Dispatcher::new(bot, registry.clone(), bot_username.clone());

    info!(
        bot_username = %bot_username,
        commands = registry.len(),
        "Bot started"
    );

    let (mut messages, poller) = message_stream(client);

    while let Some(message) = messages.recv().await {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_content = %message.text,
            "Received message"
        );

        if !dispatcher.dispatch(&message) {
            debug!(
                chat_id = message.chat.id,
                message_id = message.id,
                "No command matched message"
            );
        }
    }

    match poller.await {
        Ok(result) => result.map_err(Into::into),
        Err(e) => Err(anyhow::anyhow!("Poll loop task failed: {}", e)),
    }
}
