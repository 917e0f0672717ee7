//! Command definition, flags, handler capability, and the matching rule.

use std::future::Future;
use std::ops::BitOr;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use tgram_core::{HandlerError, Message};

/// Bit set of visibility/context restrictions for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandFlags(u32);

impl CommandFlags {
    /// The command will not show up in help output.
    pub const HIDDEN: CommandFlags = CommandFlags(1 << 0);
    /// The command is not accessible from a group messaging context.
    pub const NO_GROUP: CommandFlags = CommandFlags(1 << 1);

    pub const fn empty() -> Self {
        CommandFlags(0)
    }

    pub const fn contains(self, other: CommandFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CommandFlags {
    type Output = CommandFlags;

    fn bitor(self, rhs: CommandFlags) -> CommandFlags {
        CommandFlags(self.0 | rhs.0)
    }
}

/// User-supplied logic invoked when a command matches. One operation: consume
/// the inbound message, produce side effects, possibly fail.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, message: Message) -> Result<(), HandlerError>;
}

/// Adapts a closure to [`CommandHandler`] so closures and objects register uniformly.
struct FnHandler {
    f: Box<dyn Fn(Message) -> BoxFuture<'static, Result<(), HandlerError>> + Send + Sync>,
}

#[async_trait]
impl CommandHandler for FnHandler {
    async fn handle(&self, message: Message) -> Result<(), HandlerError> {
        (self.f)(message).await
    }
}

/// A command to respond to. Immutable after registration; the `name` is unique
/// within a registry and is what incoming text is matched against.
#[derive(Clone)]
pub struct Command {
    name: String,
    description: String,
    flags: CommandFlags,
    handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        flags: CommandFlags,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            flags,
            handler,
        }
    }

    /// Creates a command whose handler is an async closure.
    pub fn from_fn<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        flags: CommandFlags,
        f: F,
    ) -> Self
    where
        F: Fn(Message) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        Self::new(
            name,
            description,
            flags,
            Arc::new(FnHandler {
                f: Box::new(move |msg| Box::pin(f(msg))),
            }),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn flags(&self) -> CommandFlags {
        self.flags
    }

    pub fn handler(&self) -> Arc<dyn CommandHandler> {
        self.handler.clone()
    }

    /// Returns true if the message is addressing this bot and command, and the
    /// command is appropriate to the message's context.
    ///
    /// Rules, in order:
    /// 1. trimmed text == `/name`: matches; for a NO_GROUP command only outside groups.
    /// 2. in a group (and not NO_GROUP): trimmed text == `@username name` or `/name@username`.
    pub fn matches(&self, message: &Message, bot_username: &str) -> bool {
        let inp = message.text.trim();

        if inp == format!("/{}", self.name) {
            if self.flags.contains(CommandFlags::NO_GROUP) {
                return !message.is_group();
            }
            return true;
        }

        if message.is_group() {
            if self.flags.contains(CommandFlags::NO_GROUP) {
                return false;
            }

            if inp == format!("@{} {}", bot_username, self.name)
                || inp == format!("/{}@{}", self.name, bot_username)
            {
                return true;
            }
        }

        false
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("flags", &self.flags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tgram_core::{Chat, Context, MessageDirection, MessageKind, User};

    fn message(text: &str, group: bool) -> Message {
        Message {
            id: 1,
            user: User {
                id: 42,
                username: Some("someone".to_string()),
                ..Default::default()
            },
            chat: Chat {
                id: if group { -100 } else { 42 },
                username: if group {
                    None
                } else {
                    Some("someone".to_string())
                },
                ..Default::default()
            },
            text: text.to_string(),
            kind: MessageKind::Text,
            direction: MessageDirection::Incoming,
            date: Utc::now(),
            reply_to_message_id: None,
            context: Context::new(),
        }
    }

    fn command(flags: CommandFlags) -> Command {
        Command::from_fn("help", "Shows this help page.", flags, |_msg| async { Ok(()) })
    }

    #[test]
    fn test_exact_match_in_private_chat() {
        let cmd = command(CommandFlags::empty());
        assert!(cmd.matches(&message("/help", false), "mybot"));
    }

    #[test]
    fn test_exact_match_trims_whitespace() {
        let cmd = command(CommandFlags::empty());
        assert!(cmd.matches(&message("  /help \n", false), "mybot"));
    }

    #[test]
    fn test_exact_match_in_group() {
        let cmd = command(CommandFlags::empty());
        assert!(cmd.matches(&message("/help", true), "mybot"));
    }

    #[test]
    fn test_mention_prefix_match_in_group() {
        let cmd = command(CommandFlags::empty());
        assert!(cmd.matches(&message("@mybot help", true), "mybot"));
    }

    #[test]
    fn test_suffix_mention_match_in_group() {
        let cmd = command(CommandFlags::empty());
        assert!(cmd.matches(&message("/help@mybot", true), "mybot"));
    }

    #[test]
    fn test_mention_forms_do_not_match_in_private_chat() {
        let cmd = command(CommandFlags::empty());
        assert!(!cmd.matches(&message("@mybot help", false), "mybot"));
        assert!(!cmd.matches(&message("/help@mybot", false), "mybot"));
    }

    #[test]
    fn test_no_group_never_matches_in_group() {
        let cmd = command(CommandFlags::NO_GROUP);
        assert!(!cmd.matches(&message("/help", true), "mybot"));
        assert!(!cmd.matches(&message("@mybot help", true), "mybot"));
        assert!(!cmd.matches(&message("/help@mybot", true), "mybot"));
    }

    #[test]
    fn test_no_group_matches_in_private_chat() {
        let cmd = command(CommandFlags::NO_GROUP);
        assert!(cmd.matches(&message("/help", false), "mybot"));
    }

    #[test]
    fn test_other_text_does_not_match() {
        let cmd = command(CommandFlags::empty());
        assert!(!cmd.matches(&message("/helping", false), "mybot"));
        assert!(!cmd.matches(&message("help", false), "mybot"));
        assert!(!cmd.matches(&message("@otherbot help", true), "mybot"));
    }

    #[test]
    fn test_flags_combine() {
        let flags = CommandFlags::HIDDEN | CommandFlags::NO_GROUP;
        assert!(flags.contains(CommandFlags::HIDDEN));
        assert!(flags.contains(CommandFlags::NO_GROUP));
        assert!(!CommandFlags::HIDDEN.contains(CommandFlags::NO_GROUP));
        assert!(flags.contains(CommandFlags::empty()));
    }
}
