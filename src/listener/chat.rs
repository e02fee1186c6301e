//! Player chat.

use std::sync::Arc;

use crate::listener::{forward, ListenerGate, Relay};
use crate::platform::bus::Listener;
use crate::platform::events::PlatformEvent;

pub struct ChatListener {
    gate: ListenerGate,
    relay: Arc<dyn Relay>,
}

impl ChatListener {
    pub fn new(gate: ListenerGate, relay: Arc<dyn Relay>) -> Self {
        Self { gate, relay }
    }
}

impl Listener for ChatListener {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn handle(&self, event: &PlatformEvent) {
        if let PlatformEvent::Chat { player, .. } = event {
            forward(&self.gate, self.relay.as_ref(), event, Some(player.clone()));
        }
    }
}
