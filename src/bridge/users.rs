//! Online players and Discord user linking.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::common::callback::Callback;
use crate::common::types::{Player, PlayerId, RemoteUser};
use crate::config::types::UserLink;

/// Players currently online, by id.
#[derive(Default)]
pub struct PlayerLookup {
    online: DashMap<PlayerId, Player>,
}

impl PlayerLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn joined(&self, player: Player) {
        let name = player.name.clone();
        if self.online.insert(player.id, player).is_none() {
            debug!("Player online: {}", name);
        }
    }

    pub fn left(&self, id: &PlayerId) {
        if let Some((_, player)) = self.online.remove(id) {
            debug!("Player offline: {}", player.name);
        }
    }

    pub fn get(&self, id: &PlayerId) -> Option<Player> {
        self.online.get(id).map(|entry| entry.value().clone())
    }

    /// Case-insensitive name match.
    pub fn find_by_name(&self, name: &str) -> Option<Player> {
        self.online
            .iter()
            .find(|entry| entry.value().name.eq_ignore_ascii_case(name))
            .map(|entry| entry.value().clone())
    }

    /// Forget every online player.
    pub fn clear(&self) {
        let count = self.online.len();
        self.online.clear();
        if count > 0 {
            debug!("Marked {} players offline", count);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.online.len()
    }
}

/// Resolves the player behind a Discord user.
///
/// `None` means the user is not linked or the player is offline.
pub trait PlayerUserLinker: Send + Sync {
    fn player_for_user(&self, user: &RemoteUser, callback: Callback<Player>);
}

/// Linker backed by the `users` config list.
pub struct LocalPlayerUserLinker {
    links: HashMap<u64, PlayerId>,
    players: Arc<PlayerLookup>,
}

impl LocalPlayerUserLinker {
    pub fn from_config(links: &[UserLink], players: Arc<PlayerLookup>) -> Self {
        Self {
            links: links.iter().map(|l| (l.discord, l.player)).collect(),
            players,
        }
    }
}

impl PlayerUserLinker for LocalPlayerUserLinker {
    fn player_for_user(&self, user: &RemoteUser, callback: Callback<Player>) {
        let player = self
            .links
            .get(&user.id)
            .and_then(|id| self.players.get(id));
        callback.success(player);
    }
}

/// Linker that matches Discord names against online player names.
pub struct UplinkedPlayerUserLinker {
    players: Arc<PlayerLookup>,
}

impl UplinkedPlayerUserLinker {
    pub fn new(players: Arc<PlayerLookup>) -> Self {
        Self { players }
    }
}

impl PlayerUserLinker for UplinkedPlayerUserLinker {
    fn player_for_user(&self, user: &RemoteUser, callback: Callback<Player>) {
        callback.success(self.players.find_by_name(&user.name));
    }
}
