//! Advancements and legacy achievements.
//!
//! Only one variant is ever registered, chosen by the capability probe.

use std::sync::Arc;

use crate::listener::{forward, ListenerGate, Relay};
use crate::platform::bus::Listener;
use crate::platform::capability::ProgressEvents;
use crate::platform::events::PlatformEvent;

pub struct ProgressListener {
    events: ProgressEvents,
    gate: ListenerGate,
    relay: Arc<dyn Relay>,
}

impl ProgressListener {
    pub fn new(events: ProgressEvents, gate: ListenerGate, relay: Arc<dyn Relay>) -> Self {
        Self {
            events,
            gate,
            relay,
        }
    }
}

impl Listener for ProgressListener {
    fn name(&self) -> &'static str {
        match self.events {
            ProgressEvents::Advancements => "advancement",
            ProgressEvents::Achievements => "achievement",
        }
    }

    fn handle(&self, event: &PlatformEvent) {
        let player = match (self.events, event) {
            (ProgressEvents::Advancements, PlatformEvent::Advancement { player, .. }) => player,
            (ProgressEvents::Achievements, PlatformEvent::Achievement { player, .. }) => player,
            _ => return,
        };

        forward(&self.gate, self.relay.as_ref(), event, Some(player.clone()));
    }
}
