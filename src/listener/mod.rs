//! Platform event listeners.
//!
//! Each listener owns a [`ListenerGate`] and hands the events it accepts to
//! a [`Relay`], normally the [`Bridge`].

pub mod channel;
pub mod chat;
pub mod death;
pub mod gate;
pub mod join_leave;
pub mod presence;
pub mod progress;

use std::sync::Arc;

use tracing::{debug, info};

use crate::bridge::users::PlayerLookup;
use crate::bridge::Bridge;
use crate::common::types::Player;
use crate::config::types::ListenersConfig;
use crate::platform::bus::EventBus;
use crate::platform::capability::Capabilities;
use crate::platform::events::{MessageChannel, PlatformEvent};

pub use channel::ChannelListener;
pub use chat::ChatListener;
pub use death::DeathListener;
pub use gate::ListenerGate;
pub use join_leave::JoinLeaveListener;
pub use presence::PresenceListener;
pub use progress::ProgressListener;

/// Where accepted events go.
pub trait Relay: Send + Sync {
    fn relay(&self, destination: MessageChannel, text: String, subject: Option<Player>);
}

impl Relay for Bridge {
    fn relay(&self, destination: MessageChannel, text: String, subject: Option<Player>) {
        self.send(destination, text, subject);
    }
}

/// Relay `event` if it has a destination and the gate lets it through.
fn forward(gate: &ListenerGate, relay: &dyn Relay, event: &PlatformEvent, subject: Option<Player>) {
    let Some(destination) = event.channel() else {
        debug!("Dropping {} without a destination", event.type_name());
        return;
    };

    if !gate.allows(event.type_name()) {
        debug!("Gate rejected {}", event.type_name());
        return;
    }

    relay.relay(destination.clone(), event.message().to_string(), subject);
}

/// Register the listeners enabled in `config`.
///
/// Exactly one progress listener variant is registered, chosen by
/// `capabilities`. The presence listener is always registered.
pub fn register_listeners(
    bus: &mut EventBus,
    config: &ListenersConfig,
    capabilities: &Capabilities,
    relay: Arc<dyn Relay>,
    players: Arc<PlayerLookup>,
) {
    bus.register(Arc::new(PresenceListener::new(players)));

    if config.chat.enabled {
        bus.register(Arc::new(ChatListener::new(
            ListenerGate::enabled(true),
            relay.clone(),
        )));
    } else {
        info!("Chat listener disabled");
    }

    if config.death.enabled {
        bus.register(Arc::new(DeathListener::new(
            ListenerGate::enabled(true),
            relay.clone(),
        )));
    } else {
        info!("Death listener disabled");
    }

    if config.advancement.enabled {
        bus.register(Arc::new(ProgressListener::new(
            capabilities.progress,
            ListenerGate::enabled(true),
            relay.clone(),
        )));
    } else {
        info!("Progress listener disabled");
    }

    let join_leave = &config.join_leave;
    if join_leave.join_enabled || join_leave.leave_enabled {
        bus.register(Arc::new(JoinLeaveListener::new(
            ListenerGate::enabled(join_leave.join_enabled),
            ListenerGate::enabled(join_leave.leave_enabled),
            relay.clone(),
        )));
    } else {
        info!("Join/leave listener disabled");
    }

    if config.channel.enabled {
        bus.register(Arc::new(ChannelListener::new(
            ListenerGate::from(&config.channel),
            relay,
        )));
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingRelay;
    use super::*;
    use crate::config::types::{JoinLeaveConfig, ToggleConfig};
    use crate::platform::capability::ProgressEvents;

    fn capabilities(progress: ProgressEvents) -> Capabilities {
        Capabilities { progress }
    }

    #[test]
    fn test_defaults_register_standard_listeners() {
        let mut bus = EventBus::new();
        register_listeners(
            &mut bus,
            &ListenersConfig::default(),
            &capabilities(ProgressEvents::Advancements),
            Arc::new(RecordingRelay::default()),
            Arc::new(PlayerLookup::new()),
        );

        assert_eq!(
            bus.listener_names(),
            vec!["presence", "chat", "death", "advancement", "join_leave"]
        );
    }

    #[test]
    fn test_legacy_platform_registers_achievements() {
        let mut bus = EventBus::new();
        register_listeners(
            &mut bus,
            &ListenersConfig::default(),
            &capabilities(ProgressEvents::Achievements),
            Arc::new(RecordingRelay::default()),
            Arc::new(PlayerLookup::new()),
        );

        let names = bus.listener_names();
        assert!(names.contains(&"achievement"));
        assert!(!names.contains(&"advancement"));
    }

    #[test]
    fn test_disabled_listeners_not_registered() {
        let config = ListenersConfig {
            chat: ToggleConfig { enabled: false },
            death: ToggleConfig { enabled: false },
            advancement: ToggleConfig { enabled: false },
            join_leave: JoinLeaveConfig {
                join_enabled: false,
                leave_enabled: false,
            },
            channel: Default::default(),
        };
        let mut bus = EventBus::new();
        register_listeners(
            &mut bus,
            &config,
            &capabilities(ProgressEvents::Advancements),
            Arc::new(RecordingRelay::default()),
            Arc::new(PlayerLookup::new()),
        );

        assert_eq!(bus.listener_names(), vec!["presence"]);
    }

    #[test]
    fn test_event_without_destination_is_dropped() {
        let relay = RecordingRelay::default();
        let event = PlatformEvent::Broadcast {
            channel: None,
            message: "gone".to_string(),
        };

        forward(&ListenerGate::enabled(true), &relay, &event, None);

        assert_eq!(relay.count(), 0);
    }
}
