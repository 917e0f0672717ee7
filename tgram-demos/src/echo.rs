//! Echo demo: consumes the message stream directly instead of going through
//! the runner, and echoes every plain chat message back.

use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use tgram_api::{message_stream, TelegramBotAdapter, TelegramConfig};
use tgram_core::{init_tracing, Bot};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = TelegramConfig::from_env()?;
    let log_file = config.log_file.clone().unwrap_or_else(|| "logs/echo-bot.log".to_string());
    std::fs::create_dir_all("logs")?;
    init_tracing(&log_file)?;

    let client = Arc::new(config.client());
    let bot = TelegramBotAdapter::new(client.clone());

    info!(
        start_time = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        log_file = %log_file,
        "Echo Bot started"
    );

    let (mut messages, _poller) = message_stream(client);

    while let Some(msg) = messages.recv().await {
        if !msg.is_chat() {
            continue;
        }

        info!(
            user_id = msg.user.id,
            chat_id = msg.chat.id,
            message_content = %msg.text,
            "Echoing message"
        );

        match bot.reply_to(&msg, &format!("Echo: {}", msg.text)).await {
            Ok(()) => info!(user_id = msg.user.id, chat_id = msg.chat.id, "Sent echo response"),
            Err(e) => {
                error!(user_id = msg.user.id, chat_id = msg.chat.id, error = %e, "Failed to send echo")
            }
        }
    }

    Ok(())
}
