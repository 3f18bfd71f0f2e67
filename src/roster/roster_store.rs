//! Per-channel rosters and the alias table they share.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::roster::{AliasTable, ChannelId, RosterError, UserId};

/// Snapshot of one channel, as returned by [`RosterStore::list_all`].
#[derive(Debug, PartialEq, Eq)]
pub struct ChannelListing<'a> {
    pub channel_id: &'a str,
    /// Members in insertion order with their alias, `None` when unset
    pub members: Vec<(&'a str, Option<&'a str>)>,
}

/// Read-only view of the whole store, used to render `ls`.
#[derive(Debug, PartialEq, Eq)]
pub struct Listing<'a> {
    /// Every known channel ordered by id, including those left empty
    pub channels: Vec<ChannelListing<'a>>,
    /// Every alias entry ordered by user id, whatever the memberships
    pub aliases: Vec<(&'a str, &'a str)>,
}

/// In-memory state of the bot.
///
/// Holds the roster of every channel (an ordered, duplicate-free list of user
/// ids) and the [`AliasTable`]. The store lives as long as the server process;
/// nothing is persisted.
///
/// The store itself does no locking. The server shares it behind a
/// `tokio::sync::Mutex` and every command holds the lock for its whole
/// read-modify-write.
///
/// # Examples
///
/// ```
/// # use rollcall::roster::RosterStore;
/// let mut store = RosterStore::new();
/// store.add_member("C1", "U1");
/// store.set_alias("U1", "Alice");
///
/// // U1 has no other membership, so its alias goes with it
/// assert_eq!(store.remove_member("C1", "U1"), Ok(false));
/// assert_eq!(store.alias("U1"), None);
/// ```
#[derive(Debug, Default)]
pub struct RosterStore {
    /// Channel id -> members in insertion order
    rosters: BTreeMap<ChannelId, Vec<UserId>>,
    /// Aliases shared across channels
    aliases: AliasTable,
}

impl RosterStore {
    pub fn new() -> Self {
        RosterStore {
            rosters: BTreeMap::new(),
            aliases: AliasTable::new(),
        }
    }

    /// Returns `true` if `user_id` is in the roster of `channel_id`.
    pub fn is_member(&self, channel_id: &str, user_id: &str) -> bool {
        self.rosters
            .get(channel_id)
            .is_some_and(|members| members.iter().any(|member| member == user_id))
    }

    /// Returns the members of `channel_id`, or `None` if the channel has never
    /// had a roster.
    pub fn members(&self, channel_id: &str) -> Option<&[UserId]> {
        self.rosters.get(channel_id).map(Vec::as_slice)
    }

    /// Appends `user_id` to the roster of `channel_id`, creating the roster if
    /// needed.
    ///
    /// Returns `false` without touching anything if the user already is a
    /// member.
    pub fn add_member(&mut self, channel_id: &str, user_id: &str) -> bool {
        let members = self.rosters.entry(channel_id.to_owned()).or_default();

        if members.iter().any(|member| member == user_id) {
            debug!("{} is already a member of {}", user_id, channel_id);
            return false;
        }

        members.push(user_id.to_owned());
        info!("added {} to {}", user_id, channel_id);
        true
    }

    /// Removes `user_id` from the roster of `channel_id`.
    ///
    /// Returns whether the user is still a member of another channel. When it
    /// is not, the alias of the user is dropped as well.
    ///
    /// # Errors
    ///
    /// [`RosterError::NotAMember`] if the channel has no roster or the user is
    /// not in it. Nothing is modified in that case.
    pub fn remove_member(&mut self, channel_id: &str, user_id: &str) -> Result<bool, RosterError> {
        let members = self
            .rosters
            .get_mut(channel_id)
            .ok_or(RosterError::NotAMember)?;

        let position = members
            .iter()
            .position(|member| member == user_id)
            .ok_or(RosterError::NotAMember)?;
        members.remove(position);
        info!("removed {} from {}", user_id, channel_id);

        let member_elsewhere = self
            .rosters
            .values()
            .any(|members| members.iter().any(|member| member == user_id));

        if !member_elsewhere && self.aliases.clear(user_id) {
            info!("pruned alias of {} after its last membership", user_id);
        }

        Ok(member_elsewhere)
    }

    /// Removes every member of `channel_id` one at a time, pruning aliases the
    /// same way [`RosterStore::remove_member`] does.
    ///
    /// # Errors
    ///
    /// [`RosterError::EmptyChannel`] if the channel has no roster at all.
    pub fn clear_channel(&mut self, channel_id: &str) -> Result<(), RosterError> {
        let members = self
            .rosters
            .get(channel_id)
            .cloned()
            .ok_or(RosterError::EmptyChannel)?;

        for user_id in members {
            self.remove_member(channel_id, &user_id)?;
        }

        Ok(())
    }

    /// Drops every roster and every alias.
    pub fn clear_all(&mut self) {
        info!("clearing all rosters and aliases");
        self.rosters.clear();
        self.aliases = AliasTable::new();
    }

    pub fn alias(&self, user_id: &str) -> Option<&str> {
        self.aliases.get(user_id)
    }

    pub fn set_alias(&mut self, user_id: &str, alias: &str) {
        self.aliases.set(user_id, alias);
    }

    /// Removes the alias of `user_id` whatever its memberships.
    pub fn clear_alias(&mut self, user_id: &str) -> bool {
        self.aliases.clear(user_id)
    }

    /// Returns a snapshot of every roster and alias.
    pub fn list_all(&self) -> Listing<'_> {
        let channels = self
            .rosters
            .iter()
            .map(|(channel_id, members)| ChannelListing {
                channel_id: channel_id.as_str(),
                members: members
                    .iter()
                    .map(|user_id| (user_id.as_str(), self.aliases.get(user_id)))
                    .collect(),
            })
            .collect();

        Listing {
            channels,
            aliases: self.aliases.iter().collect(),
        }
    }
}
