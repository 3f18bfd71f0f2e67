//! Add command handler.
//!
//! Adds a user to the roster of the current channel. Resolving the name of a
//! user without alias needs a Slack API call that may outlast the slash command
//! response window, so the result is always delivered through the response url
//! of the invocation, even when no lookup is needed.
//!
//! # Flow
//!
//! 1. Reject direct messages and a missing user argument (immediate answers)
//! 2. Lock the store, then spawn the task owning the lock
//! 3. In the task: add the user, pick an alias if it has none (the given one,
//!    or the first word of its Slack name), release the lock and post the
//!    result to the response url
//!
//! Holding the lock for the whole task means no other command observes a
//! half-applied `add`, and commands received after it see it completed. The
//! name lookup is bounded by [`LOOKUP_TIMEOUT`] so other commands wait at most
//! that long.

use std::{sync::Arc, time::Duration};

use log::{debug, error, info};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::{
    commands::{
        CommandContext, CommandError,
        markdown_response::{
            format_add_pending, format_added, format_added_as, format_added_unresolved,
            format_already_member,
        },
    },
    roster::RosterStore,
    slack::Requester,
    utils::resolve_user_id,
};

/// Longest time the store stays locked waiting for a Slack name, below the 3
/// seconds Slack gives a slash command to answer.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Starts adding the user designated by `user` to the current channel.
///
/// Returns the acknowledgement to answer with and the handle of the task
/// delivering the result.
///
/// # Errors
///
/// - [`CommandError::UnsupportedContext`] from a direct message
/// - [`CommandError::MissingArgument`] without user argument
pub async fn handle_add<R>(
    store: Arc<Mutex<RosterStore>>,
    requester: Arc<R>,
    context: &CommandContext,
    user: Option<&str>,
    alias: Option<&str>,
) -> Result<(String, JoinHandle<()>), CommandError>
where
    R: Requester + Send + Sync + 'static,
{
    debug!("handling add command: {:?} {:?}", user, alias);

    if context.is_direct_message() {
        return Err(CommandError::UnsupportedContext);
    }

    let user_id = resolve_user_id(user.ok_or(CommandError::MissingArgument)?, &context.user_id);
    let channel_id = context.channel_id.clone();
    let response_url = context.response_url.clone();
    let alias = alias.map(str::to_owned);
    let acknowledgement = format_add_pending(&user_id);

    let mut store = store.lock_owned().await;

    let handle = tokio::spawn(async move {
        let response = add_user(
            &mut store,
            requester.as_ref(),
            &channel_id,
            &user_id,
            alias.as_deref(),
        )
        .await;
        drop(store);

        if let Err(e) = requester.post_response(&response_url, &response).await {
            error!("failed to deliver add response for {}: {:#}", user_id, e);
        }
    });

    Ok((acknowledgement, handle))
}

/// Adds `user_id` to `channel_id` and returns the text to deliver.
///
/// A user without alias gets `alias` when given, otherwise the first word of
/// the name Slack knows it by. A user who already has an alias keeps it. When
/// the name lookup fails or outlasts [`LOOKUP_TIMEOUT`] the user stays added,
/// without alias.
pub async fn add_user<R: Requester>(
    store: &mut RosterStore,
    requester: &R,
    channel_id: &str,
    user_id: &str,
    alias: Option<&str>,
) -> String {
    if !store.add_member(channel_id, user_id) {
        return format_already_member(user_id);
    }

    if store.alias(user_id).is_some() {
        return format_added(user_id);
    }

    let alias = match alias {
        Some(alias) => alias.to_owned(),
        None => match timeout(LOOKUP_TIMEOUT, requester.get_user_name(user_id)).await {
            Ok(Ok(name)) => match name.split_whitespace().next() {
                Some(first_name) => first_name.to_owned(),
                None => {
                    error!("empty name resolved for {}", user_id);
                    return format_added_unresolved(user_id);
                }
            },
            Ok(Err(e)) => {
                error!("failed to resolve name of {}: {:#}", user_id, e);
                return format_added_unresolved(user_id);
            }
            Err(_) => {
                error!("name lookup of {} timed out", user_id);
                return format_added_unresolved(user_id);
            }
        },
    };

    store.set_alias(user_id, &alias);
    info!("{} joined {} as {}", user_id, channel_id, alias);

    format_added_as(user_id, &alias)
}
