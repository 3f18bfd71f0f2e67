//! Slash command parsing, execution and response formatting.
//!
//! This module provides the complete command processing pipeline of the bot.
//!
//! # Overview
//!
//! 1. **Parsing** - Converting the slash command text into a [`command::Command`]
//! 2. **Execution** - Routing the command to its handler, which reads or mutates
//!    the [`RosterStore`](crate::roster::RosterStore)
//! 3. **Response** - Formatting results as Slack markdown, either immediately or
//!    through the response url for `add`
//!
//! # Architecture
//!
//! ```text
//! Slash command text
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: handle() = parse() + execute()
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────────────┐
//! │ Action Handlers     │
//! │  - handle_add       │ ── deferred, posts to response_url
//! │  - handle_remove    │
//! │  - handle_alias     │
//! │  - handle_list      │
//! │  - handle_reset     │
//! │  - handle_help      │
//! │  - handle_pick      │
//! └─────────────────────┘
//!      │
//!      ▼
//! ┌────────────────────────┐
//! │  CommandResult         │
//! │  - Immediate(text)     │
//! │  - Deferred{ack, task} │
//! └────────────────────────┘
//! ```
//!
//! ## Available Commands
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `add` | `<'me' \| user_id> [alias]` | Add a user to the current channel |
//! | `remove` | `<'me' \| user_id>` | Remove a user from the current channel |
//! | `alias` | `<'me' \| user_id> [alias]` | Set or clear the alias of a user |
//! | `ls` | None | Show every roster and alias |
//! | `reset` | `['hard']` | Reset the current channel, or everything |
//! | `help` | None | Display help information |
//! | anything else | None | Pick a random member of the channel |
//!
//! # Error Handling
//!
//! Every [`CommandError`] is an expected condition. It is rendered as the
//! response text and never reaches the HTTP layer as a failure.
//!
//! # Module Organization
//!
//! - [`commander`] - Orchestrator for parsing and executing commands
//! - [`command`] - Command enum and parsing
//! - [`actions`] - Individual command handlers
//! - [`markdown_response`] - Response formatting
//! - [`random`] - Index source of the random pick

use tokio::task::JoinHandle;

mod actions;
mod command;
mod commander;
mod markdown_response;
mod random;

pub use crate::commands::commander::Commander;
#[cfg(test)]
pub use crate::commands::random::MockRandomSource;
pub use crate::commands::random::{ClockRandom, RandomSource};

use crate::commands::markdown_response::{
    format_empty_channel, format_missing_argument, format_not_a_member,
    format_unsupported_context,
};

/// Runtime context of a slash command invocation.
///
/// # Examples
///
/// ```
/// # use rollcall::commands::CommandContext;
/// let context = CommandContext {
///     channel_id: "C0123ABCD".to_string(),
///     channel_name: "general".to_string(),
///     user_id: "U0123ABCD".to_string(),
///     response_url: "https://hooks.slack.com/commands/T1/1/abc".to_string(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Channel where the command was issued
    pub channel_id: String,
    /// Name of that channel, `directmessage` for direct messages
    pub channel_name: String,
    /// User who issued the command
    pub user_id: String,
    /// Url accepting deferred responses for this invocation
    pub response_url: String,
}

impl CommandContext {
    /// Returns `true` when the command was issued from a direct message.
    pub fn is_direct_message(&self) -> bool {
        self.channel_name == "directmessage"
    }
}

/// Result of command execution.
///
/// # Variants
///
/// * `Immediate` - Final response text, to return in the HTTP response
/// * `Deferred` - The result will be posted to the response url by the task;
///   the HTTP response only carries the acknowledgement
#[derive(Debug)]
pub enum CommandResult {
    /// Final response text
    Immediate(String),
    /// Task delivering the response through the response url
    Deferred {
        acknowledgement: String,
        task: JoinHandle<()>,
    },
}

/// Expected failures of a command, shown to the user.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandError {
    /// The user argument is missing
    MissingArgument,
    /// The user is not in the roster of the channel
    NotAMember(String),
    /// The command cannot be used from a direct message
    UnsupportedContext,
    /// The channel has no roster
    EmptyChannel,
}

/// Formats a command error into a user-friendly message.
///
/// # Examples
///
/// ```
/// # use rollcall::commands::{format_command_error, CommandError};
/// let message = format_command_error(CommandError::MissingArgument);
/// assert_eq!(message, "Please provide a user id.");
/// ```
pub fn format_command_error(error: CommandError) -> String {
    match error {
        CommandError::MissingArgument => format_missing_argument(),
        CommandError::NotAMember(user_id) => format_not_a_member(&user_id),
        CommandError::UnsupportedContext => format_unsupported_context(),
        CommandError::EmptyChannel => format_empty_channel(),
    }
}
