//! Listener registration and event dispatch.

use std::sync::Arc;

use tracing::{debug, info};

use crate::platform::events::PlatformEvent;

/// Something that reacts to platform events.
pub trait Listener: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Handle one event. Must not block.
    fn handle(&self, event: &PlatformEvent);

    /// The game server connection was lost.
    fn disconnected(&self) {}
}

/// Ordered set of registered listeners.
///
/// Filled during startup, then owned by the platform connector which
/// dispatches every decoded event to it from a single task.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Arc<dyn Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Arc<dyn Listener>) {
        info!("Registered listener: {}", listener.name());
        self.listeners.push(listener);
    }

    pub fn dispatch(&self, event: &PlatformEvent) {
        debug!(
            event = event.type_name(),
            listeners = self.listeners.len(),
            "Dispatching platform event"
        );
        for listener in &self.listeners {
            listener.handle(event);
        }
    }

    /// Tell every listener the game server went away.
    pub fn disconnected(&self) {
        for listener in &self.listeners {
            listener.disconnected();
        }
    }

    pub fn listener_names(&self) -> Vec<&'static str> {
        self.listeners.iter().map(|l| l.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    impl Listener for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn handle(&self, _event: &PlatformEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }

        fn disconnected(&self) {
            self.0.store(0, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_dispatch_reaches_every_listener() {
        let first = Arc::new(Counting(AtomicUsize::new(0)));
        let second = Arc::new(Counting(AtomicUsize::new(0)));
        let mut bus = EventBus::new();
        bus.register(first.clone());
        bus.register(second.clone());

        bus.dispatch(&PlatformEvent::Broadcast {
            channel: None,
            message: "tick".to_string(),
        });

        assert_eq!(first.0.load(Ordering::SeqCst), 1);
        assert_eq!(second.0.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_names(), vec!["counting", "counting"]);
    }

    #[test]
    fn test_disconnect_reaches_every_listener() {
        let listener = Arc::new(Counting(AtomicUsize::new(3)));
        let mut bus = EventBus::new();
        bus.register(listener.clone());

        bus.disconnected();

        assert_eq!(listener.0.load(Ordering::SeqCst), 0);
    }
}
