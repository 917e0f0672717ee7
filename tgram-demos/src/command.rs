//! Command demo: registers a `test` command and runs the polling runner.
//! The built-in `/help` command lists everything registered here.

use std::sync::Arc;

use anyhow::Result;
use tgram_api::{run_polling, TelegramBotAdapter, TelegramConfig};
use tgram_commands::{Command, CommandFlags, CommandRegistry};
use tgram_core::{init_tracing, Bot, HandlerError};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = TelegramConfig::from_env()?;
    let log_file = config.log_file.clone().unwrap_or_else(|| "logs/command-bot.log".to_string());
    std::fs::create_dir_all("logs")?;
    init_tracing(&log_file)?;

    let client = Arc::new(config.client());
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(client.clone()));

    let registry = Arc::new(CommandRegistry::new());
    registry.add(Command::from_fn(
        "test",
        "Test command to test and commands to test.",
        CommandFlags::empty(),
        move |msg| {
            let bot = bot.clone();
            async move {
                bot.reply_to(&msg, "Bugger off!")
                    .await
                    .map_err(|e| HandlerError::Failed(e.to_string()))
            }
        },
    ));

    info!(log_file = %log_file, "Command bot starting");
    run_polling(client, registry, Some("Hello! I am a tgram demo bot.".to_string())).await
}
