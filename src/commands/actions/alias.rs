//! Alias command handler.
//!
//! Sets the alias of a user, shared by every channel. Without alias argument,
//! the alias of the user is removed whatever its memberships.

use log::debug;

use crate::{
    commands::{
        CommandContext, CommandError,
        markdown_response::{format_alias_removed, format_alias_set},
    },
    roster::RosterStore,
    utils::resolve_user_id,
};

/// Sets, or clears when `alias` is `None`, the alias of the user designated by
/// `user`.
///
/// # Errors
///
/// [`CommandError::MissingArgument`] without user argument.
pub fn handle_alias(
    store: &mut RosterStore,
    context: &CommandContext,
    user: Option<&str>,
    alias: Option<&str>,
) -> Result<String, CommandError> {
    debug!("handling alias command: {:?} {:?}", user, alias);

    let user_id = resolve_user_id(user.ok_or(CommandError::MissingArgument)?, &context.user_id);

    match alias {
        Some(alias) => {
            store.set_alias(&user_id, alias);
            Ok(format_alias_set(&user_id, alias))
        }
        None => {
            store.clear_alias(&user_id);
            Ok(format_alias_removed(&user_id))
        }
    }
}
