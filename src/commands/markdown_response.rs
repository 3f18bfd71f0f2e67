//! Markdown response formatters for bot commands.
//!
//! This module provides functions to format bot responses in Slack's `mrkdwn`
//! flavour (`*bold*`, fenced code blocks) for display in the channel.

use crate::roster::Listing;

/// Formats the help message showing available bot commands.
///
/// The message is the same for every caller.
///
/// # Examples
///
/// ```
/// # use rollcall::commands::markdown_response::format_help;
/// let help = format_help();
/// assert!(help.contains("- ls"));
/// ```
pub fn format_help() -> String {
    let add = "- add ['me' | user_id] [alias]\n  Adds a user into the current channel. If no alias is provided, first name will be used as alias.";
    let remove = "- remove ['me' | user_id]\n  Removes a user from the current channel. If the user doesn't belong in any other channels, the alias is also removed.";
    let alias = "- alias ['me' | user_id] [alias]\n  Sets a user's alias. This alias is shared across all channels. If no alias is passed in, it removes the user's alias.";
    let ls = "- ls\n  Shows the channels/aliases mapping.";
    let reset = "- reset ['hard']\n  Resets the current channel's users. 'hard' keyword resets all channels and aliases.";
    let help = "- help\n  Shows this message.";
    let pick = "- (anything else)\n  Picks a random user of the current channel, other than you.";

    format!(
        "```{}```",
        [add, remove, alias, ls, reset, help, pick].join("\n\n")
    )
}

/// Formats the immediate acknowledgement of an `add`, the actual result being
/// delivered later through the response url.
pub fn format_add_pending(user_id: &str) -> String {
    format!("Adding user *{}* to this channel...", user_id)
}

pub fn format_already_member(user_id: &str) -> String {
    format!("User *{}* is already in this channel.", user_id)
}

/// Formats a successful `add` of a user who already had an alias.
pub fn format_added(user_id: &str) -> String {
    format!("User *{}* has been added to this channel.", user_id)
}

/// Formats a successful `add` that gave the user a new alias.
///
/// # Examples
///
/// ```
/// # use rollcall::commands::markdown_response::format_added_as;
/// assert_eq!(
///     format_added_as("U123", "Bob"),
///     "User *U123* has been added to this channel as *Bob*."
/// );
/// ```
pub fn format_added_as(user_id: &str, alias: &str) -> String {
    format!(
        "User *{}* has been added to this channel as *{}*.",
        user_id, alias
    )
}

/// Formats a successful `add` where the name lookup failed.
pub fn format_added_unresolved(user_id: &str) -> String {
    format!(
        "User *{}* has been added to this channel, but their name could not be resolved. Use `alias` to set one.",
        user_id
    )
}

pub fn format_removed(user_id: &str) -> String {
    format!("Removed user *{}* from this channel.", user_id)
}

pub fn format_alias_set(user_id: &str, alias: &str) -> String {
    format!("User *{}* alias set to *{}*.", user_id, alias)
}

pub fn format_alias_removed(user_id: &str) -> String {
    format!("Removed alias for *{}*.", user_id)
}

pub fn format_reset_channel() -> String {
    "Successfully reset this channel.".to_owned()
}

pub fn format_reset_hard() -> String {
    "Successfully reset all channels and users.".to_owned()
}

/// Formats the answer of the random pick when the invoker is the only member.
pub fn format_alone() -> String {
    "You're the only person in this channel.".to_owned()
}

/// Formats the channels and aliases of the store.
///
/// Two sections, each replaced by a single line when empty:
/// - channels with at least one member, the current one marked `(HERE)`
/// - every alias, whatever the memberships of the user
///
/// # Examples
///
/// ```
/// # use rollcall::commands::markdown_response::format_listing;
/// # use rollcall::roster::RosterStore;
/// let store = RosterStore::new();
/// assert_eq!(
///     format_listing(&store.list_all(), "C1"),
///     "No channels have been set.\nNo aliases have been set."
/// );
/// ```
pub fn format_listing(listing: &Listing, current_channel_id: &str) -> String {
    let channels_md = listing
        .channels
        .iter()
        .filter(|channel| !channel.members.is_empty())
        .map(|channel| {
            let here = match channel.channel_id == current_channel_id {
                true => " (HERE)",
                false => "",
            };
            let members = channel
                .members
                .iter()
                .map(|(user_id, alias)| format!("  {}: {}\n", user_id, alias.unwrap_or("(no alias)")))
                .collect::<String>();

            format!("{}:{}\n{}", channel.channel_id, here, members)
        })
        .collect::<String>();

    let channels_section = match channels_md.is_empty() {
        true => "No channels have been set.".to_owned(),
        false => format!("*Channels*\n```{}```", channels_md),
    };

    let aliases_md = listing
        .aliases
        .iter()
        .map(|(user_id, alias)| format!("  {}: {}\n", user_id, alias))
        .collect::<String>();

    let aliases_section = match aliases_md.is_empty() {
        true => "No aliases have been set.".to_owned(),
        false => format!("*Users*\n```{}```", aliases_md),
    };

    format!("{}\n{}", channels_section, aliases_section)
}

pub fn format_missing_argument() -> String {
    "Please provide a user id.".to_owned()
}

pub fn format_not_a_member(user_id: &str) -> String {
    format!("User *{}* is not in this channel.", user_id)
}

pub fn format_unsupported_context() -> String {
    "Direct Messages cannot be used.".to_owned()
}

pub fn format_empty_channel() -> String {
    "There are no users in this channel.".to_owned()
}
