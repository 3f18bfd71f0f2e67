//! Random pick handler, run for any unknown or empty verb.
//!
//! Picks a member of the current channel other than the invoker and answers
//! with its alias, or its id when it has none. The choice is delegated to a
//! [`RandomSource`], which in production is best-effort pseudo-random and gives
//! no fairness guarantee.

use log::debug;

use crate::{
    commands::{CommandContext, CommandError, RandomSource, markdown_response::format_alone},
    roster::RosterStore,
};

/// Picks a random member of the current channel, excluding the invoker.
///
/// # Errors
///
/// [`CommandError::EmptyChannel`] when the channel never had a roster. A
/// roster emptied by `remove` answers like one holding only the invoker.
pub fn handle_pick<S: RandomSource>(
    store: &RosterStore,
    context: &CommandContext,
    random_source: &S,
) -> Result<String, CommandError> {
    debug!("handling random pick in {}", context.channel_id);

    let members = store
        .members(&context.channel_id)
        .ok_or(CommandError::EmptyChannel)?;

    let candidates: Vec<&str> = members
        .iter()
        .map(String::as_str)
        .filter(|member| *member != context.user_id)
        .collect();

    if candidates.is_empty() {
        return Ok(format_alone());
    }

    let chosen = candidates[random_source.pick_index(candidates.len()) % candidates.len()];
    debug!("picked {} among {} candidates", chosen, candidates.len());

    Ok(store.alias(chosen).unwrap_or(chosen).to_owned())
}
