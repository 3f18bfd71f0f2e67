//! Slack API client.
//!
//! # Modules
//!
//! - `requester` - HTTP client resolving user names and posting deferred responses
//! - `response_structs` - Data structures for Slack requests and responses

mod requester;
mod response_structs;

#[cfg(test)]
pub use crate::slack::requester::MockRequester;
pub use crate::slack::requester::{Requester, SlackRequester};
