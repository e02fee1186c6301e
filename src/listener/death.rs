//! Player deaths.

use std::sync::Arc;

use tracing::debug;

use crate::listener::{forward, ListenerGate, Relay};
use crate::platform::bus::Listener;
use crate::platform::events::PlatformEvent;

/// Relays deaths of players. Other entities are ignored.
pub struct DeathListener {
    gate: ListenerGate,
    relay: Arc<dyn Relay>,
}

impl DeathListener {
    pub fn new(gate: ListenerGate, relay: Arc<dyn Relay>) -> Self {
        Self { gate, relay }
    }
}

impl Listener for DeathListener {
    fn name(&self) -> &'static str {
        "death"
    }

    fn handle(&self, event: &PlatformEvent) {
        match event {
            PlatformEvent::Death {
                target: Some(player),
                ..
            } => forward(&self.gate, self.relay.as_ref(), event, Some(player.clone())),
            PlatformEvent::Death { target: None, .. } => debug!("Ignoring non-player death"),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::testing::{alice, RecordingRelay};
    use crate::platform::events::MessageChannel;

    #[test]
    fn test_player_death_relayed() {
        let relay = Arc::new(RecordingRelay::default());
        let listener = DeathListener::new(ListenerGate::enabled(true), relay.clone());

        listener.handle(&PlatformEvent::Death {
            target: Some(alice()),
            channel: Some(MessageChannel::World("overworld".to_string())),
            message: "Alice fell from a high place".to_string(),
        });

        let sent = relay.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].2, Some(alice()));
    }

    #[test]
    fn test_non_player_death_ignored() {
        let relay = Arc::new(RecordingRelay::default());
        let listener = DeathListener::new(ListenerGate::enabled(true), relay.clone());

        listener.handle(&PlatformEvent::Death {
            target: None,
            channel: Some(MessageChannel::Broadcast),
            message: "Zombie died".to_string(),
        });

        assert_eq!(relay.count(), 0);
    }
}
