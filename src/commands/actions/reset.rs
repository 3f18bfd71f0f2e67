//! Reset command handler.
//!
//! - `reset` removes every member of the current channel, one at a time, so
//!   aliases of users left without membership are pruned
//! - `reset hard` drops every roster and every alias

use log::{debug, info};

use crate::{
    commands::{
        CommandContext, CommandError,
        markdown_response::{format_reset_channel, format_reset_hard},
    },
    roster::RosterStore,
};

/// Resets the current channel, or the whole store when `hard` is set.
///
/// # Errors
///
/// [`CommandError::EmptyChannel`] when resetting a channel that has no roster.
pub fn handle_reset(
    store: &mut RosterStore,
    context: &CommandContext,
    hard: bool,
) -> Result<String, CommandError> {
    debug!("handling reset command, hard: {}", hard);

    if hard {
        store.clear_all();
        return Ok(format_reset_hard());
    }

    store
        .clear_channel(&context.channel_id)
        .map_err(|_| CommandError::EmptyChannel)?;
    info!("reset channel {}", context.channel_id);

    Ok(format_reset_channel())
}
