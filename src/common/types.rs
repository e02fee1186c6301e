//! Shared types used across the application.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::callback::{Callback, Named};

/// Unique identifier for a game player.
pub type PlayerId = Uuid;

/// A player on the game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Named for Player {
    fn name(&self, callback: Callback<String>) {
        callback.success(Some(self.name.clone()));
    }

    #[cfg(test)]
    fn unique_id(&self, callback: Callback<String>) {
        callback.success(Some(self.id.to_string()));
    }
}

/// A Discord channel messages can be delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteChannel(pub u64);

impl RemoteChannel {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RemoteChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Discord user, as seen when they post a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUser {
    pub id: u64,
    /// Effective display name (nickname or username).
    pub name: String,
}
