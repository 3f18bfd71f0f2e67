//! Help command handler.
//!
//! Displays every available command with its syntax and a short description.
//!
//! This is a stateless command that always returns the same help message.

use log::debug;

use crate::commands::markdown_response::format_help;

/// Returns formatted help information about available commands.
pub fn handle_help() -> String {
    debug!("handling help command");

    format_help()
}
