//! Events and commands exchanged with the game server.
//!
//! The game server streams [`PlatformEvent`]s as JSON lines and accepts
//! [`PlatformCommand`]s the same way.

use serde::{Deserialize, Serialize};

use crate::common::types::{Player, PlayerId};

/// Where a platform message is addressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum MessageChannel {
    /// Everyone on the server.
    Broadcast,
    /// Players in one world.
    World(String),
    /// Members of one team.
    Team(String),
    /// A fixed set of players.
    Players(Vec<PlayerId>),
    /// The server console only.
    Console,
    /// A named channel provided by a chat plugin.
    Custom(String),
}

/// Known event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Chat,
    Death,
    Advancement,
    Achievement,
    Join,
    Leave,
    Broadcast,
}

impl EventKind {
    /// Stable dotted name used by listener filters.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Chat => "message.chat",
            Self::Death => "entity.death",
            Self::Advancement => "advancement.grant",
            Self::Achievement => "achievement.grant",
            Self::Join => "connection.join",
            Self::Leave => "connection.leave",
            Self::Broadcast => "message.broadcast",
        }
    }
}

/// An event raised on the game server.
///
/// `channel` is `None` when the platform cancelled or emptied the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlatformEvent {
    /// A player sent a chat message.
    Chat {
        player: Player,
        channel: Option<MessageChannel>,
        message: String,
    },
    /// An entity died. `target` is set only when it was a player.
    Death {
        target: Option<Player>,
        channel: Option<MessageChannel>,
        message: String,
    },
    /// A player was granted an advancement.
    Advancement {
        player: Player,
        channel: Option<MessageChannel>,
        message: String,
    },
    /// A player earned an achievement (servers without advancements).
    Achievement {
        player: Player,
        channel: Option<MessageChannel>,
        message: String,
    },
    /// A player joined.
    Join {
        player: Player,
        channel: Option<MessageChannel>,
        message: String,
    },
    /// A player left.
    Leave {
        player: Player,
        channel: Option<MessageChannel>,
        message: String,
    },
    /// A server-wide broadcast with no player behind it.
    Broadcast {
        channel: Option<MessageChannel>,
        message: String,
    },
    /// Any message event this bridge has no dedicated variant for.
    Other {
        type_name: String,
        channel: Option<MessageChannel>,
        message: String,
    },
}

impl PlatformEvent {
    /// The known category, or `None` for [`PlatformEvent::Other`].
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Self::Chat { .. } => Some(EventKind::Chat),
            Self::Death { .. } => Some(EventKind::Death),
            Self::Advancement { .. } => Some(EventKind::Advancement),
            Self::Achievement { .. } => Some(EventKind::Achievement),
            Self::Join { .. } => Some(EventKind::Join),
            Self::Leave { .. } => Some(EventKind::Leave),
            Self::Broadcast { .. } => Some(EventKind::Broadcast),
            Self::Other { .. } => None,
        }
    }

    /// Name matched against listener filter prefixes.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Other { type_name, .. } => type_name,
            _ => self.kind().map(|k| k.type_name()).unwrap_or_default(),
        }
    }

    pub fn channel(&self) -> Option<&MessageChannel> {
        match self {
            Self::Chat { channel, .. }
            | Self::Death { channel, .. }
            | Self::Advancement { channel, .. }
            | Self::Achievement { channel, .. }
            | Self::Join { channel, .. }
            | Self::Leave { channel, .. }
            | Self::Broadcast { channel, .. }
            | Self::Other { channel, .. } => channel.as_ref(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Chat { message, .. }
            | Self::Death { message, .. }
            | Self::Advancement { message, .. }
            | Self::Achievement { message, .. }
            | Self::Join { message, .. }
            | Self::Leave { message, .. }
            | Self::Broadcast { message, .. }
            | Self::Other { message, .. } => message,
        }
    }
}

/// A request sent back to the game server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlatformCommand {
    /// Show a message to a channel's audience.
    Send {
        channel: MessageChannel,
        sender: String,
        text: String,
    },
    /// Run a command as the server console.
    Console { command: String },
}
