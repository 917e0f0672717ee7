//! Append-only command registry with first-match-wins lookup and help rendering.

use std::sync::{Arc, Mutex};

use tgram_core::Message;
use tracing::debug;

use crate::command::{Command, CommandFlags};

/// Ordered set of commands. Append-only at runtime; matching iterates in
/// insertion order. `add` and lookup may run concurrently from any task:
/// the list is mutex-guarded and readers work on a cloned snapshot.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Mutex<Vec<Arc<Command>>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command. Later additions are matched after earlier ones.
    pub fn add(&self, command: Command) {
        let mut commands = self.commands.lock().expect("registry lock poisoned");
        debug!(command = %command.name(), "Registered command");
        commands.push(Arc::new(command));
    }

    /// Insertion-order snapshot of the registered commands.
    pub fn snapshot(&self) -> Vec<Arc<Command>> {
        self.commands.lock().expect("registry lock poisoned").clone()
    }

    /// Scans in insertion order and returns the first command matching the
    /// message, stopping at the first hit. Linear; n is tens at most.
    pub fn find_match(&self, message: &Message, bot_username: &str) -> Option<Arc<Command>> {
        self.snapshot()
            .into_iter()
            .find(|cmd| cmd.matches(message, bot_username))
    }

    /// Renders the help listing: one `/name - description` line per command,
    /// sorted by name. Hidden commands are always omitted; NO_GROUP commands
    /// are omitted when rendering for a group chat.
    pub fn help(&self, group_chat: bool) -> String {
        let mut commands = self.snapshot();
        commands.sort_by(|a, b| a.name().cmp(b.name()));

        let mut reply = String::new();
        for cmd in commands {
            if cmd.flags().contains(CommandFlags::HIDDEN) {
                continue;
            }
            if cmd.flags().contains(CommandFlags::NO_GROUP) && group_chat {
                continue;
            }
            reply.push_str(&format!("/{} - {}\n", cmd.name(), cmd.description()));
        }

        reply
    }

    pub fn len(&self) -> usize {
        self.commands.lock().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
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
            user: User::default(),
            chat: Chat {
                id: 9,
                username: if group { None } else { Some("peer".to_string()) },
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

    fn noop(name: &str, description: &str, flags: CommandFlags) -> Command {
        Command::from_fn(name, description, flags, |_msg| async { Ok(()) })
    }

    #[test]
    fn test_find_match_first_wins_in_insertion_order() {
        let registry = CommandRegistry::new();
        registry.add(noop("start", "First registration.", CommandFlags::empty()));
        registry.add(noop("start", "Second registration.", CommandFlags::empty()));

        let found = registry.find_match(&message("/start", false), "mybot").unwrap();
        assert_eq!(found.description(), "First registration.");
    }

    #[test]
    fn test_find_match_none_for_unknown_command() {
        let registry = CommandRegistry::new();
        registry.add(noop("start", "Starts.", CommandFlags::empty()));
        assert!(registry.find_match(&message("/stop", false), "mybot").is_none());
    }

    #[test]
    fn test_distinct_names_match_at_most_one() {
        let registry = CommandRegistry::new();
        registry.add(noop("start", "Starts.", CommandFlags::empty()));
        registry.add(noop("stop", "Stops.", CommandFlags::empty()));

        let msg = message("/stop", false);
        let matching: Vec<_> = registry
            .snapshot()
            .into_iter()
            .filter(|c| c.matches(&msg, "mybot"))
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].name(), "stop");
    }

    #[test]
    fn test_help_sorted_by_name() {
        let registry = CommandRegistry::new();
        registry.add(noop("stop", "Stops.", CommandFlags::empty()));
        registry.add(noop("about", "About.", CommandFlags::empty()));
        registry.add(noop("start", "Starts.", CommandFlags::empty()));

        assert_eq!(
            registry.help(false),
            "/about - About.\n/start - Starts.\n/stop - Stops.\n"
        );
    }

    #[test]
    fn test_help_omits_hidden() {
        let registry = CommandRegistry::new();
        registry.add(noop("debug", "Internal.", CommandFlags::HIDDEN));
        registry.add(noop("start", "Starts.", CommandFlags::empty()));

        let help = registry.help(false);
        assert!(!help.contains("/debug"));
        assert!(help.contains("/start"));
    }

    #[test]
    fn test_help_omits_no_group_for_groups_only() {
        let registry = CommandRegistry::new();
        registry.add(noop("secret", "Private only.", CommandFlags::NO_GROUP));
        registry.add(noop("start", "Starts.", CommandFlags::empty()));

        assert!(registry.help(false).contains("/secret"));
        assert!(!registry.help(true).contains("/secret"));
        assert!(registry.help(true).contains("/start"));
    }

    #[test]
    fn test_late_add_is_visible() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        registry.add(noop("late", "Added after startup.", CommandFlags::empty()));
        assert_eq!(registry.len(), 1);
        assert!(registry.find_match(&message("/late", false), "mybot").is_some());
    }
}
