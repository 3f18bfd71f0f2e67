//! Request and response structures for the Slack endpoints used by the bot.

use serde::{Deserialize, Serialize};

/// Response of `users.info`.
///
/// Slack answers with HTTP 200 even on failure, `ok` tells whether the call
/// succeeded and `error` carries the reason otherwise.
#[derive(Deserialize, Debug)]
pub struct UserInfoResponse {
    pub ok: bool,
    #[serde(default)]
    pub user: Option<UserDetail>,
    #[serde(default)]
    pub error: Option<String>,
}

/// User object returned by `users.info`.
#[derive(Deserialize, Debug)]
pub struct UserDetail {
    /// Username (handle).
    #[serde(default)]
    pub name: String,
    /// Full name, unset for bots and some guest accounts.
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub profile: Option<ProfileDetail>,
}

impl UserDetail {
    /// Returns the most human name available for the user: the real name,
    /// then the profile display name, then the handle.
    pub fn display_name(&self) -> &str {
        non_empty(&self.real_name)
            .or_else(|| {
                self.profile
                    .as_ref()
                    .and_then(|profile| non_empty(&profile.display_name))
            })
            .unwrap_or(&self.name)
    }
}

fn non_empty(name: &Option<String>) -> Option<&str> {
    name.as_deref().filter(|name| !name.trim().is_empty())
}

/// Profile part of a Slack user.
#[derive(Deserialize, Debug)]
pub struct ProfileDetail {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Body posted to a slash command `response_url`.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct DeferredResponse<'a> {
    pub text: &'a str,
    pub response_type: &'static str,
}
