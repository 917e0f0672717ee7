//! Supervised dispatch: run the matched handler on its own task, convert
//! failures into a logged diagnostic plus a best-effort chat reply.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use tgram_core::{Bot, HandlerError, Message};
use tracing::{debug, error, warn};

use crate::registry::CommandRegistry;

/// Reply sent to the chat when a handler fails; delivery is best effort.
const FATAL_REPLY: &str = "Fatal bot error. Sorry!";

const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(30);

/// Matches inbound messages against the registry and runs the matched handler
/// concurrently. Each dispatch is independent: no ordering guarantee between
/// messages, no retry on failure, and no bound on the number of in-flight
/// handler tasks (known scalability limitation at this scale).
pub struct Dispatcher {
    bot: Arc<dyn Bot>,
    registry: Arc<CommandRegistry>,
    bot_username: String,
    handler_timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        bot: Arc<dyn Bot>,
        registry: Arc<CommandRegistry>,
        bot_username: impl Into<String>,
    ) -> Self {
        Self {
            bot,
            registry,
            bot_username: bot_username.into(),
            handler_timeout: DEFAULT_HANDLER_TIMEOUT,
        }
    }

    /// Sets the per-handler deadline. An invocation exceeding it is treated as
    /// a handler failure.
    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }

    pub fn registry(&self) -> Arc<CommandRegistry> {
        self.registry.clone()
    }

    pub fn bot_username(&self) -> &str {
        &self.bot_username
    }

    /// Scans the registry in insertion order; for the first matching command,
    /// spawns its handler and returns true immediately. Returns false when no
    /// command matches (a normal outcome, not an error).
    ///
    /// A failure inside the handler (an `Err` return, a panic, or the deadline
    /// expiring) never reaches the caller: the supervisor task logs it and
    /// answers the chat with a single best-effort fatal-error reply.
    pub fn dispatch(&self, message: &Message) -> bool {
        let Some(command) = self.registry.find_match(message, &self.bot_username) else {
            return false;
        };

        debug!(
            command = %command.name(),
            user_id = message.user.id,
            chat_id = message.chat.id,
            "Dispatching command"
        );

        let bot = self.bot.clone();
        let message = message.clone();
        let timeout = self.handler_timeout;
        tokio::spawn(supervise(bot, command, message, timeout));

        true
    }
}

/// Runs one handler invocation under its deadline and absorbs its failure.
async fn supervise(
    bot: Arc<dyn Bot>,
    command: Arc<crate::command::Command>,
    message: Message,
    timeout: Duration,
) {
    let handler = command.handler();
    let handler_message = message.clone();
    // The handler runs on its own task so a panic surfaces as JoinError
    // instead of unwinding through this supervisor.
    let task = tokio::spawn(async move {
        match tokio::time::timeout(timeout, handler.handle(handler_message)).await {
            Ok(result) => result,
            Err(_) => Err(HandlerError::Timeout),
        }
    });

    let failure = match task.await {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(e) if e.is_panic() => Some(format!("panic: {}", panic_text(e.into_panic()))),
        Err(e) => Some(e.to_string()),
    };

    let Some(reason) = failure else {
        debug!(
            command = %command.name(),
            chat_id = message.chat.id,
            "Command handler finished"
        );
        return;
    };

    error!(
        command = %command.name(),
        user_id = message.user.id,
        chat_id = message.chat.id,
        error = %reason,
        "Recovered from command handler failure"
    );

    if let Err(e) = bot.reply_to(&message, FATAL_REPLY).await {
        warn!(
            command = %command.name(),
            chat_id = message.chat.id,
            error = %e,
            "Failed to deliver fatal-error reply"
        );
    }
}

fn panic_text(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// Behavior tests live in tests/dispatcher_test.rs; they need a mock Bot and a
// multi-threaded runtime.
