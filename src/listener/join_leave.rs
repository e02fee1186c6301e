//! Join and leave messages, gated separately.

use std::sync::Arc;

use crate::listener::{forward, ListenerGate, Relay};
use crate::platform::bus::Listener;
use crate::platform::events::PlatformEvent;

pub struct JoinLeaveListener {
    join: ListenerGate,
    leave: ListenerGate,
    relay: Arc<dyn Relay>,
}

impl JoinLeaveListener {
    pub fn new(join: ListenerGate, leave: ListenerGate, relay: Arc<dyn Relay>) -> Self {
        Self { join, leave, relay }
    }
}

impl Listener for JoinLeaveListener {
    fn name(&self) -> &'static str {
        "join_leave"
    }

    fn handle(&self, event: &PlatformEvent) {
        match event {
            PlatformEvent::Join { player, .. } => {
                forward(&self.join, self.relay.as_ref(), event, Some(player.clone()))
            }
            PlatformEvent::Leave { player, .. } => {
                forward(&self.leave, self.relay.as_ref(), event, Some(player.clone()))
            }
            _ => {}
        }
    }
}
