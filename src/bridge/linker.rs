//! Chat endpoint to Discord channel linking.

use std::collections::HashMap;

use tracing::info;

use crate::bridge::endpoint::ChatEndpoint;
use crate::common::callback::Callback;
use crate::common::error::BridgeError;
use crate::common::types::RemoteChannel;
use crate::config::types::ChannelLink;

/// Maps chat endpoints to Discord channels and back.
pub trait ChatChannelLinker: Send + Sync {
    /// Discord channel for an in-game chat.
    fn translate(&self, endpoint: &ChatEndpoint, callback: Callback<RemoteChannel>);

    /// Chat endpoint id for a Discord channel.
    fn reverse(&self, channel: &RemoteChannel, callback: Callback<String>);
}

/// Linker backed by the `channels` config list.
pub struct LocalChatChannelLinker {
    by_chat: HashMap<String, RemoteChannel>,
    by_remote: HashMap<RemoteChannel, String>,
}

impl LocalChatChannelLinker {
    pub fn from_config(links: &[ChannelLink]) -> Self {
        let mut by_chat = HashMap::new();
        let mut by_remote = HashMap::new();

        for link in links {
            let remote = RemoteChannel(link.discord);
            by_chat.insert(link.chat.clone(), remote);
            by_remote.insert(remote, link.chat.clone());
        }

        info!("Loaded {} channel links", by_chat.len());
        Self { by_chat, by_remote }
    }
}

impl ChatChannelLinker for LocalChatChannelLinker {
    fn translate(&self, endpoint: &ChatEndpoint, callback: Callback<RemoteChannel>) {
        match self.by_chat.get(endpoint.id()) {
            Some(remote) => callback.success(Some(*remote)),
            None => callback.failure(BridgeError::Unmapped {
                endpoint: endpoint.id().to_string(),
            }),
        }
    }

    fn reverse(&self, channel: &RemoteChannel, callback: Callback<String>) {
        match self.by_remote.get(channel) {
            Some(chat) => callback.success(Some(chat.clone())),
            None => callback.failure(BridgeError::UnmappedRemote {
                channel: channel.get(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::connector::PlatformHandle;

    fn linker() -> LocalChatChannelLinker {
        LocalChatChannelLinker::from_config(&[
            ChannelLink {
                chat: "global".to_string(),
                discord: 10,
            },
            ChannelLink {
                chat: "world:nether".to_string(),
                discord: 20,
            },
        ])
    }

    #[test]
    fn test_translate_linked_endpoint() {
        let (platform, _rx) = PlatformHandle::channel();
        let (callback, mut rx) = Callback::channel();

        linker().translate(&ChatEndpoint::global(platform), callback);

        assert_eq!(rx.try_recv().unwrap(), Ok(Some(RemoteChannel(10))));
    }

    #[test]
    fn test_translate_unlinked_endpoint_fails() {
        let (platform, _rx) = PlatformHandle::channel();
        let endpoint = ChatEndpoint::channel(
            "team:red",
            "red",
            crate::platform::events::MessageChannel::Team("red".to_string()),
            platform,
        );
        let (callback, mut rx) = Callback::channel();

        linker().translate(&endpoint, callback);

        assert_eq!(
            rx.try_recv().unwrap(),
            Err(BridgeError::Unmapped {
                endpoint: "team:red".to_string()
            })
        );
    }

    #[test]
    fn test_reverse() {
        let linker = linker();

        let (callback, mut rx) = Callback::channel();
        linker.reverse(&RemoteChannel(20), callback);
        assert_eq!(rx.try_recv().unwrap(), Ok(Some("world:nether".to_string())));

        let (callback, mut rx) = Callback::channel();
        linker.reverse(&RemoteChannel(99), callback);
        assert_eq!(
            rx.try_recv().unwrap(),
            Err(BridgeError::UnmappedRemote { channel: 99 })
        );
    }
}
