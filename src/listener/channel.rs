//! Catch-all relay for message events, filtered by type name.

use std::sync::Arc;

use crate::listener::{forward, ListenerGate, Relay};
use crate::platform::bus::Listener;
use crate::platform::events::PlatformEvent;

/// Relays any message event the gate accepts, as a system message.
pub struct ChannelListener {
    gate: ListenerGate,
    relay: Arc<dyn Relay>,
}

impl ChannelListener {
    pub fn new(gate: ListenerGate, relay: Arc<dyn Relay>) -> Self {
        Self { gate, relay }
    }
}

impl Listener for ChannelListener {
    fn name(&self) -> &'static str {
        "channel"
    }

    fn handle(&self, event: &PlatformEvent) {
        forward(&self.gate, self.relay.as_ref(), event, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::testing::{alice, RecordingRelay};
    use crate::platform::events::MessageChannel;

    fn other(type_name: &str) -> PlatformEvent {
        PlatformEvent::Other {
            type_name: type_name.to_string(),
            channel: Some(MessageChannel::Custom("staff".to_string())),
            message: "something happened".to_string(),
        }
    }

    #[test]
    fn test_whitelist_matches_unknown_event_by_prefix() {
        let relay = Arc::new(RecordingRelay::default());
        let listener = ChannelListener::new(
            ListenerGate::new(true, false, vec!["com.example.".to_string()]),
            relay.clone(),
        );

        listener.handle(&other("com.example.SpecialEvent"));
        listener.handle(&other("org.other.Event"));

        let sent = relay.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].2, None);
    }

    #[test]
    fn test_blacklist_drops_matching_kind() {
        let relay = Arc::new(RecordingRelay::default());
        let listener = ChannelListener::new(
            ListenerGate::new(true, true, vec!["message.chat".to_string()]),
            relay.clone(),
        );

        listener.handle(&PlatformEvent::Chat {
            player: alice(),
            channel: Some(MessageChannel::Broadcast),
            message: "hi".to_string(),
        });
        listener.handle(&PlatformEvent::Broadcast {
            channel: Some(MessageChannel::Broadcast),
            message: "restart in 5".to_string(),
        });

        let sent = relay.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "restart in 5");
    }

    #[test]
    fn test_disabled_gate() {
        let relay = Arc::new(RecordingRelay::default());
        let listener = ChannelListener::new(ListenerGate::enabled(false), relay.clone());

        listener.handle(&other("com.example.SpecialEvent"));

        assert_eq!(relay.count(), 0);
    }
}
