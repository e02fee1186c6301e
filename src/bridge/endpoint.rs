//! In-game chat endpoints.

use std::hash::{Hash, Hasher};

use crate::common::callback::{Callback, Named};
use crate::platform::connector::PlatformHandle;
use crate::platform::events::{MessageChannel, PlatformCommand};

/// Unique id of the server-wide chat.
pub const GLOBAL_ID: &str = "global";
/// Display name of the server-wide chat.
pub const GLOBAL_NAME: &str = "Global";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Global,
    Channel,
}

/// A message posted into an in-game chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
}

/// An in-game chat a message can be bridged from or to.
///
/// Two endpoints are equal when their ids are equal.
#[derive(Debug, Clone)]
pub struct ChatEndpoint {
    kind: EndpointKind,
    id: String,
    name: String,
    channel: MessageChannel,
    platform: PlatformHandle,
}

impl ChatEndpoint {
    /// The server-wide chat.
    pub fn global(platform: PlatformHandle) -> Self {
        Self {
            kind: EndpointKind::Global,
            id: GLOBAL_ID.to_string(),
            name: GLOBAL_NAME.to_string(),
            channel: MessageChannel::Broadcast,
            platform,
        }
    }

    /// A named chat scoped to part of the server.
    pub fn channel(
        id: impl Into<String>,
        name: impl Into<String>,
        channel: MessageChannel,
        platform: PlatformHandle,
    ) -> Self {
        Self {
            kind: EndpointKind::Channel,
            id: id.into(),
            name: name.into(),
            channel,
            platform,
        }
    }

    pub fn kind(&self) -> EndpointKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub fn message_channel(&self) -> &MessageChannel {
        &self.channel
    }

    /// Post a message into this chat on the game server.
    pub fn send(&self, message: ChatMessage, callback: Callback<()>) {
        let command = PlatformCommand::Send {
            channel: self.channel.clone(),
            sender: message.sender,
            text: message.text,
        };

        match self.platform.send(command) {
            Ok(()) => callback.success(Some(())),
            Err(e) => callback.failure(e),
        }
    }
}

impl Named for ChatEndpoint {
    fn name(&self, callback: Callback<String>) {
        callback.success(Some(self.name.clone()));
    }

    #[cfg(test)]
    fn unique_id(&self, callback: Callback<String>) {
        callback.success(Some(self.id.clone()));
    }
}

impl PartialEq for ChatEndpoint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ChatEndpoint {}

impl Hash for ChatEndpoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
