//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, the entry point for slash
//! commands. It parses the command text and routes the command to its handler.
//!
//! # Flow
//!
//! ```text
//! Slash command text → parse() → Command → execute() → CommandResult
//! ```
//!
//! # Examples
//!
//! ```no_run
//! # use rollcall::commands::{ClockRandom, CommandContext, CommandResult, Commander};
//! # use rollcall::roster::RosterStore;
//! # use rollcall::slack::SlackRequester;
//! # use std::sync::Arc;
//! # use tokio::sync::Mutex;
//! # async fn example() {
//! let store = Arc::new(Mutex::new(RosterStore::new()));
//! let requester = Arc::new(SlackRequester::new("https://slack.com/api", "xoxb-token"));
//! let commander = Commander::new(store, requester, ClockRandom);
//!
//! let context = CommandContext {
//!     channel_id: "C0123ABCD".to_string(),
//!     channel_name: "general".to_string(),
//!     user_id: "U0123ABCD".to_string(),
//!     response_url: "https://hooks.slack.com/commands/T1/1/abc".to_string(),
//! };
//! if let CommandResult::Immediate(text) = commander.handle(&context, "ls").await {
//!     println!("Response: {}", text);
//! }
//! # }
//! ```

use std::sync::Arc;

use log::info;
use tokio::sync::Mutex;

use crate::{
    commands::{
        CommandContext, CommandResult, RandomSource,
        actions::{
            handle_add, handle_alias, handle_help, handle_list, handle_pick, handle_remove,
            handle_reset,
        },
        command::Command,
        format_command_error,
    },
    roster::RosterStore,
    slack::Requester,
};

/// Command orchestrator for parsing and executing slash commands.
///
/// The Commander owns a shared reference to the [`RosterStore`] and locks it
/// for the duration of each command, so commands never interleave.
///
/// # Supported Commands
///
/// - `add <'me' | user_id> [alias]` - Add a user to the channel
/// - `remove <'me' | user_id>` - Remove a user from the channel
/// - `alias <'me' | user_id> [alias]` - Set or clear an alias
/// - `ls` - Show rosters and aliases
/// - `reset ['hard']` - Reset the channel, or everything
/// - `help` - Display help information
/// - anything else - Pick a random member of the channel
pub struct Commander<R: Requester, S: RandomSource> {
    /// Shared bot state
    store: Arc<Mutex<RosterStore>>,
    /// Slack client, shared with the deferred `add` tasks
    requester: Arc<R>,
    /// Index source of the random pick
    random_source: S,
}

impl<R, S> Commander<R, S>
where
    R: Requester + Send + Sync + 'static,
    S: RandomSource,
{
    /// Creates a new Commander working on `store`.
    pub fn new(store: Arc<Mutex<RosterStore>>, requester: Arc<R>, random_source: S) -> Self {
        Commander {
            store,
            requester,
            random_source,
        }
    }

    /// Parses the text of a slash command. Never fails, see [`Command::parse`].
    pub fn parse(&self, text: &str) -> Command {
        Command::parse(text)
    }

    /// Parses and executes the text of a slash command.
    pub async fn handle(&self, context: &CommandContext, text: &str) -> CommandResult {
        info!(
            "command from {} in {}: {:?}",
            context.user_id, context.channel_id, text
        );

        let command = self.parse(text);
        self.execute(&command, context).await
    }

    /// Executes a parsed command and returns the result.
    ///
    /// # Command Handlers
    ///
    /// - [`Command::Add`] → [`handle_add`], the only deferred result
    /// - [`Command::Remove`] → [`handle_remove`]
    /// - [`Command::Alias`] → [`handle_alias`]
    /// - [`Command::List`] → [`handle_list`]
    /// - [`Command::Reset`] → [`handle_reset`]
    /// - [`Command::Help`] → [`handle_help`]
    /// - [`Command::Pick`] → [`handle_pick`]
    ///
    /// Command errors are formatted into an [`CommandResult::Immediate`] text.
    pub async fn execute(&self, command: &Command, context: &CommandContext) -> CommandResult {
        let result = match command {
            Command::Add(user, alias) => {
                return match handle_add(
                    Arc::clone(&self.store),
                    Arc::clone(&self.requester),
                    context,
                    user.as_deref(),
                    alias.as_deref(),
                )
                .await
                {
                    Ok((acknowledgement, task)) => CommandResult::Deferred {
                        acknowledgement,
                        task,
                    },
                    Err(error) => CommandResult::Immediate(format_command_error(error)),
                };
            }
            Command::Remove(user) => {
                handle_remove(&mut *self.store.lock().await, context, user.as_deref())
            }
            Command::Alias(user, alias) => handle_alias(
                &mut *self.store.lock().await,
                context,
                user.as_deref(),
                alias.as_deref(),
            ),
            Command::List => Ok(handle_list(&*self.store.lock().await, context)),
            Command::Reset(hard) => handle_reset(&mut *self.store.lock().await, context, *hard),
            Command::Help => Ok(handle_help()),
            Command::Pick => handle_pick(&*self.store.lock().await, context, &self.random_source),
        };

        CommandResult::Immediate(result.unwrap_or_else(format_command_error))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockall::predicate::eq;
    use tokio::time::timeout;

    use super::*;
    use crate::commands::actions::LOOKUP_TIMEOUT;
    use crate::commands::markdown_response::format_added_unresolved;
    use crate::commands::MockRandomSource;
    use crate::slack::MockRequester;

    fn create_test_context(channel_id: &str) -> CommandContext {
        CommandContext {
            channel_id: channel_id.to_string(),
            channel_name: "general".to_string(),
            user_id: "U9".to_string(),
            response_url: "http://localhost/response".to_string(),
        }
    }

    fn create_commander(
        requester: MockRequester,
        random_source: MockRandomSource,
    ) -> (
        Arc<Mutex<RosterStore>>,
        Commander<MockRequester, MockRandomSource>,
    ) {
        let store = Arc::new(Mutex::new(RosterStore::new()));
        let commander = Commander::new(Arc::clone(&store), Arc::new(requester), random_source);
        (store, commander)
    }

    fn immediate(result: CommandResult) -> String {
        match result {
            CommandResult::Immediate(text) => text,
            CommandResult::Deferred { .. } => panic!("Expected immediate result"),
        }
    }

    async fn deferred(result: CommandResult) {
        match result {
            CommandResult::Deferred { task, .. } => task.await.unwrap(),
            CommandResult::Immediate(text) => panic!("Expected deferred result, got {}", text),
        }
    }

    #[test]
    fn test_parse_commands() {
        let (_, commander) = create_commander(MockRequester::new(), MockRandomSource::new());
        assert_eq!(commander.parse("ls"), Command::List);
        assert_eq!(commander.parse("reset hard"), Command::Reset(true));
        assert_eq!(commander.parse("anything"), Command::Pick);
    }

    #[tokio::test]
    async fn test_handle_help() {
        let (_, commander) = create_commander(MockRequester::new(), MockRandomSource::new());
        let context = create_test_context("C1");

        let text = immediate(commander.handle(&context, "help").await);

        assert_eq!(text, handle_help());
    }

    #[tokio::test]
    async fn test_add_then_remove_end_to_end() {
        let mut requester = MockRequester::new();
        requester.expect_get_user_name().never();
        requester
            .expect_post_response()
            .with(
                eq("http://localhost/response"),
                eq("User *U123* has been added to this channel as *Bob*."),
            )
            .times(1)
            .returning(|_, _| Ok(()));
        let (store, commander) = create_commander(requester, MockRandomSource::new());
        let context = create_test_context("C1");

        deferred(commander.handle(&context, "add @U123 Bob").await).await;
        {
            let store = store.lock().await;
            assert_eq!(store.members("C1").unwrap(), ["U123".to_owned()]);
            assert_eq!(store.alias("U123"), Some("Bob"));
        }

        let text = immediate(commander.handle(&context, "remove @U123").await);

        assert_eq!(text, "Removed user *U123* from this channel.");
        let store = store.lock().await;
        assert!(store.members("C1").unwrap().is_empty());
        assert_eq!(store.alias("U123"), None);
    }

    #[tokio::test]
    async fn test_add_twice_is_idempotent() {
        let delivered = Arc::new(std::sync::Mutex::new(Vec::new()));
        let delivered_clone = Arc::clone(&delivered);
        let mut requester = MockRequester::new();
        requester.expect_get_user_name().never();
        requester
            .expect_post_response()
            .times(2)
            .returning(move |_, text| {
                delivered_clone.lock().unwrap().push(text.to_owned());
                Ok(())
            });
        let (store, commander) = create_commander(requester, MockRandomSource::new());
        let context = create_test_context("C1");

        deferred(commander.handle(&context, "add U1 Al").await).await;
        deferred(commander.handle(&context, "add U1 Al").await).await;

        assert_eq!(store.lock().await.members("C1").unwrap(), ["U1".to_owned()]);
        assert_eq!(
            *delivered.lock().unwrap(),
            vec![
                "User *U1* has been added to this channel as *Al*.".to_owned(),
                "User *U1* is already in this channel.".to_owned(),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_from_direct_message_is_immediate() {
        let mut requester = MockRequester::new();
        requester.expect_post_response().never();
        let (store, commander) = create_commander(requester, MockRandomSource::new());
        let mut context = create_test_context("D1");
        context.channel_name = "directmessage".to_string();

        let text = immediate(commander.handle(&context, "add me").await);

        assert_eq!(text, "Direct Messages cannot be used.");
        assert!(store.lock().await.members("D1").is_none());
    }

    #[tokio::test]
    async fn test_add_missing_argument_is_immediate() {
        let (_, commander) = create_commander(MockRequester::new(), MockRandomSource::new());
        let context = create_test_context("C1");

        let text = immediate(commander.handle(&context, "add").await);

        assert_eq!(text, "Please provide a user id.");
    }

    #[tokio::test]
    async fn test_remove_not_a_member() {
        let (store, commander) = create_commander(MockRequester::new(), MockRandomSource::new());
        store.lock().await.add_member("C2", "U1");
        let context = create_test_context("C1");

        let text = immediate(commander.handle(&context, "remove U1").await);

        assert_eq!(text, "User *U1* is not in this channel.");
        assert!(store.lock().await.is_member("C2", "U1"));
    }

    #[tokio::test]
    async fn test_alias_clear_then_list() {
        let (store, commander) = create_commander(MockRequester::new(), MockRandomSource::new());
        let context = create_test_context("C1");
        store.lock().await.add_member("C1", "U9");

        let text = immediate(commander.handle(&context, "alias me Nine").await);
        assert_eq!(text, "User *U9* alias set to *Nine*.");

        let text = immediate(commander.handle(&context, "alias me").await);
        assert_eq!(text, "Removed alias for *U9*.");

        let text = immediate(commander.handle(&context, "ls").await);
        assert_eq!(
            text,
            "*Channels*\n```C1: (HERE)\n  U9: (no alias)\n```\nNo aliases have been set."
        );
    }

    #[tokio::test]
    async fn test_reset_hard_then_list() {
        let (store, commander) = create_commander(MockRequester::new(), MockRandomSource::new());
        let context = create_test_context("C1");
        {
            let mut store = store.lock().await;
            store.add_member("C1", "U1");
            store.add_member("C2", "U2");
            store.set_alias("U3", "Three");
        }

        let text = immediate(commander.handle(&context, "reset hard").await);
        assert_eq!(text, "Successfully reset all channels and users.");

        let text = immediate(commander.handle(&context, "ls").await);
        assert_eq!(text, "No channels have been set.\nNo aliases have been set.");
    }

    #[tokio::test]
    async fn test_reset_channel_without_roster() {
        let (_, commander) = create_commander(MockRequester::new(), MockRandomSource::new());
        let context = create_test_context("C1");

        let text = immediate(commander.handle(&context, "reset").await);

        assert_eq!(text, "There are no users in this channel.");
    }

    #[tokio::test]
    async fn test_pick_uses_random_source() {
        let mut random_source = MockRandomSource::new();
        random_source
            .expect_pick_index()
            .with(eq(2))
            .times(1)
            .returning(|_| 0);
        let (store, commander) = create_commander(MockRequester::new(), random_source);
        {
            let mut store = store.lock().await;
            store.add_member("C1", "U1");
            store.add_member("C1", "U2");
            store.add_member("C1", "U9");
            store.set_alias("U1", "Alice");
        }
        let context = create_test_context("C1");

        let text = immediate(commander.handle(&context, "").await);

        assert_eq!(text, "Alice");
    }

    #[tokio::test]
    async fn test_pick_alone() {
        let (store, commander) = create_commander(MockRequester::new(), MockRandomSource::new());
        store.lock().await.add_member("C1", "U9");
        let context = create_test_context("C1");

        let text = immediate(commander.handle(&context, "who").await);

        assert_eq!(text, "You're the only person in this channel.");
    }

    #[tokio::test]
    async fn test_add_acknowledgement_names_resolved_user() {
        let mut requester = MockRequester::new();
        requester.expect_get_user_name().never();
        requester.expect_post_response().returning(|_, _| Ok(()));
        let (_, commander) = create_commander(requester, MockRandomSource::new());
        let context = create_test_context("C1");

        for (text, expected) in [
            ("add me Nine", "Adding user *U9* to this channel..."),
            ("add <@U1|al> Al", "Adding user *U1* to this channel..."),
        ] {
            match commander.handle(&context, text).await {
                CommandResult::Deferred {
                    acknowledgement,
                    task,
                } => {
                    assert_eq!(acknowledgement, expected);
                    task.await.unwrap();
                }
                CommandResult::Immediate(text) => panic!("Expected deferred result, got {}", text),
            }
        }
    }

    /// Requester whose name lookup never answers in time.
    struct SlowRequester {
        delivered: Arc<std::sync::Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Requester for SlowRequester {
        async fn get_user_name(&self, _user_id: &str) -> anyhow::Result<String> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("Too Late".to_owned())
        }

        async fn post_response(&self, _response_url: &str, text: &str) -> anyhow::Result<()> {
            self.delivered.lock().unwrap().push(text.to_owned());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_slow_lookup_does_not_block_other_commands() {
        let delivered = Arc::new(std::sync::Mutex::new(Vec::new()));
        let requester = SlowRequester {
            delivered: Arc::clone(&delivered),
        };
        let store = Arc::new(Mutex::new(RosterStore::new()));
        let commander = Commander::new(
            Arc::clone(&store),
            Arc::new(requester),
            MockRandomSource::new(),
        );

        let task = match commander.handle(&create_test_context("C1"), "add U1").await {
            CommandResult::Deferred { task, .. } => task,
            CommandResult::Immediate(text) => panic!("Expected deferred result, got {}", text),
        };

        let listing = timeout(
            LOOKUP_TIMEOUT + Duration::from_secs(3),
            commander.handle(&create_test_context("C2"), "ls"),
        )
        .await
        .expect("ls blocked behind the name lookup");

        assert_eq!(
            immediate(listing),
            "*Channels*\n```C1:\n  U1: (no alias)\n```\nNo aliases have been set."
        );
        task.await.unwrap();
        assert_eq!(*delivered.lock().unwrap(), vec![format_added_unresolved("U1")]);
    }
}
