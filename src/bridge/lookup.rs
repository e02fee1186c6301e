//! Translator registry and the known-chats lookup.

use std::sync::Arc;

use arc_swap::ArcSwap;
use dashmap::DashMap;
use tracing::{debug, info};

use crate::bridge::endpoint::{ChatEndpoint, GLOBAL_ID};
use crate::bridge::fanout::{first_success, Candidate};
use crate::bridge::translators::ChatTranslator;
use crate::common::callback::Callback;
use crate::platform::connector::PlatformHandle;
use crate::platform::events::MessageChannel;

/// Set of registered [`ChatTranslator`]s.
///
/// Registration swaps in a new list; resolution works on a snapshot, so the
/// two never wait on each other.
pub struct ChatEndpointRegistry {
    translators: ArcSwap<Vec<Arc<dyn ChatTranslator>>>,
}

impl Default for ChatEndpointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatEndpointRegistry {
    pub fn new() -> Self {
        Self {
            translators: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Register a translator. Returns `false` if this exact instance was
    /// already registered.
    pub fn add_translator(&self, translator: Arc<dyn ChatTranslator>) -> bool {
        let mut added = false;
        self.translators.rcu(|current| {
            if current.iter().any(|t| same_instance(t, &translator)) {
                added = false;
                Arc::clone(current)
            } else {
                added = true;
                let mut next = Vec::clone(current);
                next.push(Arc::clone(&translator));
                Arc::new(next)
            }
        });

        if added {
            info!("Registered chat translator ({} total)", self.len());
        }
        added
    }

    pub fn len(&self) -> usize {
        self.translators.load().len()
    }

    /// Find the chat endpoint for a destination.
    pub fn resolve(&self, destination: &MessageChannel, callback: Callback<ChatEndpoint>) {
        let snapshot = self.translators.load_full();
        debug!(
            "Resolving {:?} across {} translators",
            destination,
            snapshot.len()
        );

        let candidates = snapshot
            .iter()
            .map(|translator| {
                let translator = Arc::clone(translator);
                let destination = destination.clone();
                Box::new(move |cb: Callback<ChatEndpoint>| translator.translate(&destination, cb))
                    as Candidate<ChatEndpoint>
            })
            .collect();

        first_success(candidates, callback);
    }
}

fn same_instance(a: &Arc<dyn ChatTranslator>, b: &Arc<dyn ChatTranslator>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

/// Chats the bridge has seen, by unique id.
///
/// Seeded with the global chat. The reverse relay looks endpoints up here
/// after the channel linker has mapped a Discord channel to an id.
pub struct ChatChannelLookup {
    chats: DashMap<String, ChatEndpoint>,
}

impl ChatChannelLookup {
    pub fn new(platform: PlatformHandle) -> Self {
        let chats = DashMap::new();
        chats.insert(GLOBAL_ID.to_string(), ChatEndpoint::global(platform));
        Self { chats }
    }

    pub fn record(&self, endpoint: &ChatEndpoint) {
        if !self.chats.contains_key(endpoint.id()) {
            debug!("Learned {:?} chat endpoint {}", endpoint.kind(), endpoint.id());
            self.chats
                .insert(endpoint.id().to_string(), endpoint.clone());
        }
    }

    pub fn get(&self, id: &str) -> Option<ChatEndpoint> {
        self.chats.get(id).map(|entry| entry.value().clone())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.chats.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::translators::{GlobalChatTranslator, NamedChannelTranslator};
    use crate::common::error::BridgeError;

    struct Declining;

    impl ChatTranslator for Declining {
        fn translate(&self, _destination: &MessageChannel, callback: Callback<ChatEndpoint>) {
            callback.success(None);
        }
    }

    #[test]
    fn test_empty_registry_fails_with_no_endpoint() {
        let registry = ChatEndpointRegistry::new();
        let (callback, mut rx) = Callback::channel();

        registry.resolve(&MessageChannel::Broadcast, callback);

        assert_eq!(rx.try_recv().unwrap(), Err(BridgeError::NoEndpoint));
    }

    #[test]
    fn test_same_instance_registered_once() {
        let registry = ChatEndpointRegistry::new();
        let translator: Arc<dyn ChatTranslator> = Arc::new(Declining);

        assert!(registry.add_translator(translator.clone()));
        assert!(!registry.add_translator(translator));
        assert!(registry.add_translator(Arc::new(Declining)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_resolve_picks_owning_translator() {
        let (platform, _rx) = PlatformHandle::channel();
        let registry = ChatEndpointRegistry::new();
        registry.add_translator(Arc::new(Declining));
        registry.add_translator(Arc::new(GlobalChatTranslator::new(platform.clone())));
        registry.add_translator(Arc::new(NamedChannelTranslator::new(platform)));

        let (callback, mut rx) = Callback::channel();
        registry.resolve(&MessageChannel::World("nether".to_string()), callback);
        let endpoint = rx.try_recv().unwrap().unwrap().unwrap();
        assert_eq!(endpoint.id(), "world:nether");

        let (callback, mut rx) = Callback::channel();
        registry.resolve(&MessageChannel::Console, callback);
        assert_eq!(rx.try_recv().unwrap(), Err(BridgeError::NoEndpoint));
    }

    #[test]
    fn test_known_chats_seeded_and_recorded() {
        let (platform, _rx) = PlatformHandle::channel();
        let chats = ChatChannelLookup::new(platform.clone());
        assert!(chats.get("global").is_some());
        assert!(chats.get("team:red").is_none());

        chats.record(&ChatEndpoint::channel(
            "team:red",
            "red",
            MessageChannel::Team("red".to_string()),
            platform,
        ));

        assert!(chats.get("team:red").is_some());
        assert_eq!(chats.len(), 2);
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(ChatEndpointRegistry::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        registry.add_translator(Arc::new(Declining));
                        let (callback, _rx) = Callback::channel();
                        registry.resolve(&MessageChannel::Broadcast, callback);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 100);
    }
}
