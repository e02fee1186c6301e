//! Per-listener enable switch and event type filter.

use crate::config::types::ChannelListenerConfig;

/// Decides whether a listener bridges an event.
///
/// An event passes when the gate is enabled and
/// `events.any(prefix of type_name) != blacklist`. With the defaults
/// (`blacklist = true`, no events) everything passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerGate {
    enabled: bool,
    blacklist: bool,
    events: Vec<String>,
}

impl ListenerGate {
    pub fn new(enabled: bool, blacklist: bool, events: Vec<String>) -> Self {
        Self {
            enabled,
            blacklist,
            events,
        }
    }

    /// A gate with no type filter.
    pub fn enabled(enabled: bool) -> Self {
        Self::new(enabled, true, Vec::new())
    }

    #[cfg(test)]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn allows(&self, type_name: &str) -> bool {
        if !self.enabled {
            return false;
        }

        let matched = self
            .events
            .iter()
            .any(|prefix| type_name.starts_with(prefix.as_str()));
        matched != self.blacklist
    }
}

impl From<&ChannelListenerConfig> for ListenerGate {
    fn from(config: &ChannelListenerConfig) -> Self {
        Self::new(config.enabled, config.blacklist, config.events.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(blacklist: bool, events: &[&str]) -> ListenerGate {
        ListenerGate::new(
            true,
            blacklist,
            events.iter().map(|e| e.to_string()).collect(),
        )
    }

    #[test]
    fn test_disabled_gate_rejects_everything() {
        let gate = ListenerGate::enabled(false);
        assert!(!gate.allows("message.chat"));
        assert!(!gate.is_enabled());
    }

    #[test]
    fn test_empty_blacklist_allows_everything() {
        let gate = ListenerGate::enabled(true);
        assert!(gate.allows("message.chat"));
        assert!(gate.allows("com.example.SpecialEvent"));
    }

    #[test]
    fn test_empty_whitelist_rejects_everything() {
        let gate = gate(false, &[]);
        assert!(!gate.allows("message.chat"));
    }

    #[test]
    fn test_blacklist_prefix() {
        let gate = gate(true, &["connection."]);
        assert!(!gate.allows("connection.join"));
        assert!(!gate.allows("connection.leave"));
        assert!(gate.allows("message.chat"));
    }

    #[test]
    fn test_whitelist_prefix() {
        let gate = gate(false, &["message.", "com.example."]);
        assert!(gate.allows("message.broadcast"));
        assert!(gate.allows("com.example.SpecialEvent"));
        assert!(!gate.allows("entity.death"));
    }

    #[test]
    fn test_from_config() {
        let gate = ListenerGate::from(&ChannelListenerConfig {
            enabled: true,
            blacklist: false,
            events: vec!["entity.".to_string()],
        });
        assert!(gate.allows("entity.death"));
        assert!(!gate.allows("message.chat"));
    }
}
