//! Keeps the online-player lookup current.

use std::sync::Arc;

use crate::bridge::users::PlayerLookup;
use crate::platform::bus::Listener;
use crate::platform::events::PlatformEvent;

pub struct PresenceListener {
    players: Arc<PlayerLookup>,
}

impl PresenceListener {
    pub fn new(players: Arc<PlayerLookup>) -> Self {
        Self { players }
    }
}

impl Listener for PresenceListener {
    fn name(&self) -> &'static str {
        "presence"
    }

    fn handle(&self, event: &PlatformEvent) {
        match event {
            PlatformEvent::Join { player, .. } | PlatformEvent::Chat { player, .. } => {
                self.players.joined(player.clone())
            }
            PlatformEvent::Leave { player, .. } => self.players.left(&player.id),
            _ => {}
        }
    }

    fn disconnected(&self) {
        self.players.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::testing::alice;

    #[test]
    fn test_join_and_leave_update_lookup() {
        let players = Arc::new(PlayerLookup::new());
        let listener = PresenceListener::new(players.clone());

        listener.handle(&PlatformEvent::Join {
            player: alice(),
            channel: None,
            message: String::new(),
        });
        assert_eq!(players.get(&alice().id), Some(alice()));

        listener.handle(&PlatformEvent::Leave {
            player: alice(),
            channel: None,
            message: String::new(),
        });
        assert_eq!(players.len(), 0);
    }

    #[test]
    fn test_disconnect_marks_everyone_offline() {
        let players = Arc::new(PlayerLookup::new());
        let listener = PresenceListener::new(players.clone());

        listener.handle(&PlatformEvent::Chat {
            player: alice(),
            channel: None,
            message: "hi".to_string(),
        });
        assert_eq!(players.len(), 1);

        listener.disconnected();
        assert_eq!(players.len(), 0);
        assert_eq!(players.find_by_name("alice"), None);
    }
}
