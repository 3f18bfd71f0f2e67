//! Remove command handler.
//!
//! Removes a user from the roster of the current channel. When the user has no
//! membership left in any channel, its alias is removed as well.
//!
//! # Errors
//!
//! - [`CommandError::MissingArgument`] without user argument
//! - [`CommandError::NotAMember`] when the user is not in the roster of this
//!   channel, including when the channel never had a roster. Nothing is
//!   modified in that case.

use log::debug;

use crate::{
    commands::{CommandContext, CommandError, markdown_response::format_removed},
    roster::RosterStore,
    utils::resolve_user_id,
};

/// Removes the user designated by `user` from the current channel.
pub fn handle_remove(
    store: &mut RosterStore,
    context: &CommandContext,
    user: Option<&str>,
) -> Result<String, CommandError> {
    debug!("handling remove command: {:?}", user);

    let user_id = resolve_user_id(user.ok_or(CommandError::MissingArgument)?, &context.user_id);

    let member_elsewhere = store
        .remove_member(&context.channel_id, &user_id)
        .map_err(|_| CommandError::NotAMember(user_id.clone()))?;

    debug!(
        "removed {} from {}, member elsewhere: {}",
        user_id, context.channel_id, member_elsewhere
    );

    Ok(format_removed(&user_id))
}
