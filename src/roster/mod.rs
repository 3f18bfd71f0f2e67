//! Roster and alias state of the bot.
//!
//! # Modules
//!
//! - `alias_table` - Display aliases shared by every channel
//! - `roster_store` - Per-channel rosters, owning the alias table
//!
//! # Invariants
//!
//! - A user appears at most once in the roster of a channel
//! - A user has at most one alias
//! - Removing the last membership of a user also removes its alias

mod alias_table;
mod roster_store;

pub use crate::roster::alias_table::AliasTable;
pub use crate::roster::roster_store::{ChannelListing, Listing, RosterStore};

/// Opaque channel identifier, as sent by Slack (`C0123ABCD`).
pub type ChannelId = String;

/// Opaque user identifier, as sent by Slack (`U0123ABCD`).
pub type UserId = String;

/// Errors returned by [`RosterStore`] operations.
///
/// Both are expected conditions that end up as a message to the user.
#[derive(Debug, PartialEq, Eq)]
pub enum RosterError {
    /// The user is not in the roster of the channel, or the channel has none.
    NotAMember,
    /// The channel has no roster at all.
    EmptyChannel,
}
