//! Collaborators shared by every bridged message.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::bridge::formatter::OutboundFormatter;
use crate::bridge::linker::ChatChannelLinker;
use crate::bridge::lookup::{ChatChannelLookup, ChatEndpointRegistry};
use crate::bridge::remote::RemoteNetwork;
use crate::bridge::users::{PlayerLookup, PlayerUserLinker};
use crate::common::error::BridgeError;
use crate::common::types::RemoteChannel;
use crate::platform::connector::PlatformHandle;
use crate::platform::console::Console;

/// Everything the pipeline needs, fixed at startup.
pub struct BridgeContext {
    registry: ChatEndpointRegistry,
    known_chats: ChatChannelLookup,
    chat_channel_linker: Arc<dyn ChatChannelLinker>,
    player_user_linker: Arc<dyn PlayerUserLinker>,
    players: Arc<PlayerLookup>,
    formatter: OutboundFormatter,
    executor: Handle,
    remote: Arc<dyn RemoteNetwork>,
    console: Console,
    console_channel: Option<RemoteChannel>,
}

impl BridgeContext {
    pub fn builder() -> BridgeContextBuilder {
        BridgeContextBuilder::default()
    }

    pub fn registry(&self) -> &ChatEndpointRegistry {
        &self.registry
    }

    pub fn known_chats(&self) -> &ChatChannelLookup {
        &self.known_chats
    }

    pub fn chat_channel_linker(&self) -> &dyn ChatChannelLinker {
        self.chat_channel_linker.as_ref()
    }

    pub fn player_user_linker(&self) -> &dyn PlayerUserLinker {
        self.player_user_linker.as_ref()
    }

    pub fn players(&self) -> &Arc<PlayerLookup> {
        &self.players
    }

    pub fn formatter(&self) -> &OutboundFormatter {
        &self.formatter
    }

    pub fn executor(&self) -> &Handle {
        &self.executor
    }

    pub fn remote(&self) -> &Arc<dyn RemoteNetwork> {
        &self.remote
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_channel(&self) -> Option<RemoteChannel> {
        self.console_channel
    }
}

/// Assembles a [`BridgeContext`]. Every collaborator except the formatter
/// and the console channel must be supplied.
#[derive(Default)]
pub struct BridgeContextBuilder {
    chat_channel_linker: Option<Arc<dyn ChatChannelLinker>>,
    player_user_linker: Option<Arc<dyn PlayerUserLinker>>,
    players: Option<Arc<PlayerLookup>>,
    formatter: Option<OutboundFormatter>,
    executor: Option<Handle>,
    remote: Option<Arc<dyn RemoteNetwork>>,
    platform: Option<PlatformHandle>,
    console_channel: Option<RemoteChannel>,
}

impl BridgeContextBuilder {
    pub fn chat_channel_linker(mut self, linker: Arc<dyn ChatChannelLinker>) -> Self {
        self.chat_channel_linker = Some(linker);
        self
    }

    pub fn player_user_linker(mut self, linker: Arc<dyn PlayerUserLinker>) -> Self {
        self.player_user_linker = Some(linker);
        self
    }

    pub fn players(mut self, players: Arc<PlayerLookup>) -> Self {
        self.players = Some(players);
        self
    }

    pub fn formatter(mut self, formatter: OutboundFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn executor(mut self, executor: Handle) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn remote(mut self, remote: Arc<dyn RemoteNetwork>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn platform(mut self, platform: PlatformHandle) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn console_channel(mut self, channel: Option<RemoteChannel>) -> Self {
        self.console_channel = channel;
        self
    }

    pub fn build(self) -> Result<BridgeContext, BridgeError> {
        let platform = self
            .platform
            .ok_or(BridgeError::MissingCollaborator { name: "platform" })?;

        Ok(BridgeContext {
            registry: ChatEndpointRegistry::new(),
            known_chats: ChatChannelLookup::new(platform.clone()),
            chat_channel_linker: self.chat_channel_linker.ok_or(
                BridgeError::MissingCollaborator {
                    name: "chat channel linker",
                },
            )?,
            player_user_linker: self.player_user_linker.ok_or(
                BridgeError::MissingCollaborator {
                    name: "player user linker",
                },
            )?,
            players: self
                .players
                .ok_or(BridgeError::MissingCollaborator {
                    name: "player lookup",
                })?,
            formatter: self.formatter.unwrap_or_default(),
            executor: self
                .executor
                .ok_or(BridgeError::MissingCollaborator { name: "executor" })?,
            remote: self.remote.ok_or(BridgeError::MissingCollaborator {
                name: "remote network",
            })?,
            console: Console::new(platform),
            console_channel: self.console_channel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_platform_fails() {
        let result = BridgeContext::builder().build();
        assert_eq!(
            result.err(),
            Some(BridgeError::MissingCollaborator { name: "platform" })
        );
    }

    #[test]
    fn test_build_without_linker_fails() {
        let (platform, _rx) = PlatformHandle::channel();
        let result = BridgeContext::builder()
            .platform(platform)
            .players(Arc::new(PlayerLookup::new()))
            .build();

        assert_eq!(
            result.err(),
            Some(BridgeError::MissingCollaborator {
                name: "chat channel linker"
            })
        );
    }
}
