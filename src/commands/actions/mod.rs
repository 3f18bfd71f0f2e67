//! Command action handlers.
//!
//! Individual handler functions for each bot command.
//!
//! # Handler Pattern
//!
//! Handlers follow a consistent pattern:
//! 1. Receive the store (locked by the caller) and the [`CommandContext`](crate::commands::CommandContext)
//! 2. Resolve the user argument (`me`, mentions) and apply the command
//! 3. Return the response text, or a [`CommandError`](crate::commands::CommandError)
//!    rendered by the caller
//!
//! [`handle_add`] is the exception: it locks the store itself and returns the
//! handle of the task delivering its response.
//!
//! # Available Handlers
//!
//! - [`handle_add`] - Add a user to the channel (deferred)
//! - [`handle_remove`] - Remove a user from the channel
//! - [`handle_alias`] - Set or clear an alias
//! - [`handle_list`] - Show rosters and aliases
//! - [`handle_reset`] - Reset the channel or everything
//! - [`handle_help`] - Display help information
//! - [`handle_pick`] - Pick a random member

mod add;
mod alias;
mod help;
mod list;
mod pick;
mod remove;
mod reset;

#[cfg(test)]
pub use crate::commands::actions::add::LOOKUP_TIMEOUT;
pub use crate::commands::actions::{
    add::handle_add, alias::handle_alias, help::handle_help, list::handle_list,
    pick::handle_pick, remove::handle_remove, reset::handle_reset,
};
