//! Display aliases shared by every channel.

use std::collections::BTreeMap;

use log::debug;

use crate::roster::UserId;

/// Maps a user id to the name the bot uses when talking about that user.
///
/// A user has at most one alias at any time. Iteration is ordered by user id
/// so that listings are stable between calls.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AliasTable {
    aliases: BTreeMap<UserId, String>,
}

impl AliasTable {
    /// Creates an empty alias table.
    pub fn new() -> Self {
        AliasTable {
            aliases: BTreeMap::new(),
        }
    }

    /// Returns the alias of `user_id`, if any.
    pub fn get(&self, user_id: &str) -> Option<&str> {
        self.aliases.get(user_id).map(String::as_str)
    }

    /// Sets the alias of `user_id`, overwriting any previous one.
    pub fn set(&mut self, user_id: &str, alias: &str) {
        debug!("setting alias of {} to {}", user_id, alias);
        self.aliases.insert(user_id.to_owned(), alias.to_owned());
    }

    /// Removes the alias of `user_id`.
    ///
    /// Returns `true` if an alias was removed. Clearing a user without alias
    /// is a no-op.
    pub fn clear(&mut self, user_id: &str) -> bool {
        debug!("clearing alias of {}", user_id);
        self.aliases.remove(user_id).is_some()
    }

    /// Iterates over `(user_id, alias)` pairs ordered by user id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(user_id, alias)| (user_id.as_str(), alias.as_str()))
    }
}
