//! List command handler.
//!
//! Renders every channel roster and every alias. Read-only.

use log::debug;

use crate::{
    commands::{CommandContext, markdown_response::format_listing},
    roster::RosterStore,
};

/// Returns the formatted state of the store, marking the current channel.
pub fn handle_list(store: &RosterStore, context: &CommandContext) -> String {
    debug!("handling ls command in {}", context.channel_id);

    format_listing(&store.list_all(), &context.channel_id)
}
