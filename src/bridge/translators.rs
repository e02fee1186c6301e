//! Mapping platform destinations to chat endpoints.

use crate::bridge::endpoint::ChatEndpoint;
use crate::common::callback::Callback;
use crate::common::error::BridgeError;
use crate::platform::connector::PlatformHandle;
use crate::platform::events::MessageChannel;

/// Maps a platform destination to a chat endpoint.
///
/// Implementations complete the callback exactly once: `Some(endpoint)` when
/// they own the destination, `None` when they don't, or a failure.
pub trait ChatTranslator: Send + Sync {
    fn translate(&self, destination: &MessageChannel, callback: Callback<ChatEndpoint>);
}

/// Owns [`MessageChannel::Broadcast`].
pub struct GlobalChatTranslator {
    global: ChatEndpoint,
}

impl GlobalChatTranslator {
    pub fn new(platform: PlatformHandle) -> Self {
        Self {
            global: ChatEndpoint::global(platform),
        }
    }
}

impl ChatTranslator for GlobalChatTranslator {
    fn translate(&self, destination: &MessageChannel, callback: Callback<ChatEndpoint>) {
        match destination {
            MessageChannel::Broadcast => callback.success(Some(self.global.clone())),
            _ => callback.success(None),
        }
    }
}

/// Owns world, team and custom channels.
pub struct NamedChannelTranslator {
    platform: PlatformHandle,
}

impl NamedChannelTranslator {
    pub fn new(platform: PlatformHandle) -> Self {
        Self { platform }
    }
}

impl ChatTranslator for NamedChannelTranslator {
    fn translate(&self, destination: &MessageChannel, callback: Callback<ChatEndpoint>) {
        let (prefix, name) = match destination {
            MessageChannel::World(name) => ("world", name),
            MessageChannel::Team(name) => ("team", name),
            MessageChannel::Custom(name) => ("channel", name),
            _ => return callback.success(None),
        };

        if name.trim().is_empty() {
            return callback.failure(BridgeError::Translator {
                message: format!("{} chat without a name", prefix),
            });
        }

        callback.success(Some(ChatEndpoint::channel(
            format!("{}:{}", prefix, name),
            name.clone(),
            destination.clone(),
            self.platform.clone(),
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::callback::Outcome;

    fn translate(translator: &dyn ChatTranslator, destination: MessageChannel) -> Outcome<ChatEndpoint> {
        let (callback, mut rx) = Callback::channel();
        translator.translate(&destination, callback);
        rx.try_recv().unwrap()
    }

    #[test]
    fn test_global_owns_broadcast_only() {
        let (platform, _rx) = PlatformHandle::channel();
        let translator = GlobalChatTranslator::new(platform);

        let endpoint = translate(&translator, MessageChannel::Broadcast).unwrap().unwrap();
        assert_eq!(endpoint.id(), "global");

        let declined = translate(&translator, MessageChannel::World("nether".to_string()));
        assert_eq!(declined.unwrap(), None);
    }

    #[test]
    fn test_named_channel_ids() {
        let (platform, _rx) = PlatformHandle::channel();
        let translator = NamedChannelTranslator::new(platform);

        let cases = [
            (MessageChannel::World("nether".to_string()), "world:nether"),
            (MessageChannel::Team("red".to_string()), "team:red"),
            (MessageChannel::Custom("staff".to_string()), "channel:staff"),
        ];
        for (destination, id) in cases {
            let endpoint = translate(&translator, destination.clone()).unwrap().unwrap();
            assert_eq!(endpoint.id(), id);
            assert_eq!(endpoint.message_channel(), &destination);
        }
    }

    #[test]
    fn test_named_channel_rejects_blank_name() {
        let (platform, _rx) = PlatformHandle::channel();
        let translator = NamedChannelTranslator::new(platform);

        assert_eq!(
            translate(&translator, MessageChannel::Team("  ".to_string())),
            Err(BridgeError::Translator {
                message: "team chat without a name".to_string()
            })
        );
    }

    #[test]
    fn test_named_channel_declines_others() {
        let (platform, _rx) = PlatformHandle::channel();
        let translator = NamedChannelTranslator::new(platform);

        for destination in [
            MessageChannel::Broadcast,
            MessageChannel::Console,
            MessageChannel::Players(Vec::new()),
        ] {
            assert_eq!(translate(&translator, destination).unwrap(), None);
        }
    }
}
