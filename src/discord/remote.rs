//! Delivery of bridged messages to Discord channels.

use std::sync::Arc;

use serenity::http::Http;
use serenity::model::id::ChannelId;
use tokio::runtime::Handle;
use tracing::debug;

use crate::bridge::remote::RemoteNetwork;
use crate::common::callback::Callback;
use crate::common::error::BridgeError;
use crate::common::types::RemoteChannel;

/// Posts messages through the Discord REST API.
pub struct DiscordRemote {
    http: Arc<Http>,
    executor: Handle,
}

impl DiscordRemote {
    pub fn new(http: Arc<Http>, executor: Handle) -> Self {
        Self { http, executor }
    }
}

impl RemoteNetwork for DiscordRemote {
    fn send(&self, channel: &RemoteChannel, text: String, callback: Callback<()>) {
        if channel.get() == 0 {
            return callback.failure(BridgeError::Delivery {
                message: "channel id 0 is not valid".to_string(),
            });
        }

        let http = Arc::clone(&self.http);
        let channel_id = ChannelId::new(channel.get());

        self.executor.spawn(async move {
            match channel_id.say(&http, &text).await {
                Ok(_) => {
                    debug!("Game -> Discord [{}]: {}", channel_id, text);
                    callback.success(Some(()));
                }
                Err(e) => callback.failure(e.into()),
            }
        });
    }
}
