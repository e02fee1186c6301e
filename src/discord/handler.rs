//! Discord gateway event handling.
//!
//! Forwards human guild messages to the bridge's inbound path.

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{debug, info};

use crate::bridge::Bridge;
use crate::common::types::{RemoteChannel, RemoteUser};

/// Discord event handler.
pub struct BridgeHandler {
    bridge: Bridge,
}

impl BridgeHandler {
    pub fn new(bridge: Bridge) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl EventHandler for BridgeHandler {
    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore our own messages
        if msg.author.id == ctx.cache.current_user().id {
            return;
        }

        // Ignore bots and webhooks
        if msg.author.bot || msg.webhook_id.is_some() {
            return;
        }

        // Only handle guild (server) messages
        if msg.guild_id.is_none() {
            return;
        }

        let urls: Vec<&str> = msg.attachments.iter().map(|a| a.url.as_str()).collect();
        let Some(text) = inbound_text(&msg.content, &urls) else {
            return;
        };

        // Effective display name
        let name = msg
            .member
            .as_ref()
            .and_then(|m| m.nick.clone())
            .or_else(|| msg.author.global_name.clone())
            .unwrap_or_else(|| msg.author.name.clone());

        debug!("Discord -> Bridge [{}] {}: {}", msg.channel_id, name, text);

        self.bridge.receive(
            RemoteChannel(msg.channel_id.get()),
            RemoteUser {
                id: msg.author.id.get(),
                name,
            },
            text,
        );
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            "Discord bot connected as {} ({} guilds)",
            ready.user.name,
            ready.guilds.len()
        );
    }
}

/// Message text plus attachment URLs, or `None` when there is nothing to relay.
fn inbound_text(content: &str, attachment_urls: &[&str]) -> Option<String> {
    let mut text = content.trim().to_string();
    for url in attachment_urls {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(url);
    }

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
