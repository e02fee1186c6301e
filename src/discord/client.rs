//! Discord bot client.
//!
//! Builds the serenity client and keeps the gateway connection alive,
//! hiding serenity details from the rest of the application.

use std::time::Duration;

use backon::BackoffBuilder;
use serenity::http::{Http, HttpBuilder};
use serenity::prelude::*;
use serenity::Client;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::bridge::Bridge;
use crate::discord::handler::BridgeHandler;

const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(5 * 60);

/// Build a REST client with request timeouts.
pub fn build_http(token: &str) -> anyhow::Result<Http> {
    let reqwest_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    Ok(HttpBuilder::new(token).client(reqwest_client).build())
}

async fn build_client(token: &str, bridge: Bridge) -> anyhow::Result<Client> {
    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILDS;

    let client = serenity::client::ClientBuilder::new_with_http(build_http(token)?, intents)
        .event_handler(BridgeHandler::new(bridge))
        .await?;
    Ok(client)
}

/// 5s initial, 5min max, factor 1.1, with jitter, unlimited retries.
fn discord_backoff() -> impl Iterator<Item = Duration> {
    backon::ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(5))
        .with_max_delay(MAX_RECONNECT_DELAY)
        .with_factor(1.1)
        .with_jitter()
        .without_max_times()
        .build()
}

pub struct DiscordBot {
    token: String,
    bridge: Bridge,
    shutdown_rx: watch::Receiver<bool>,
}

impl DiscordBot {
    pub fn new(token: String, bridge: Bridge, shutdown_rx: watch::Receiver<bool>) -> Self {
        Self {
            token,
            bridge,
            shutdown_rx,
        }
    }

    /// Run the gateway connection until shutdown.
    pub async fn run(mut self) {
        let mut backoff = discord_backoff();

        loop {
            info!("Connecting to Discord...");

            let mut client = match build_client(&self.token, self.bridge.clone()).await {
                Ok(client) => client,
                Err(e) => {
                    error!("Failed to build Discord client: {}", e);
                    if !self.wait(backoff.next()).await {
                        break;
                    }
                    continue;
                }
            };
            let shard_manager = client.shard_manager.clone();

            tokio::select! {
                result = client.start() => match result {
                    Ok(()) => {
                        info!("Discord client disconnected normally");
                        break;
                    }
                    Err(e) => {
                        error!("Discord client error: {}", e);
                        if !self.wait(backoff.next()).await {
                            break;
                        }
                    }
                },

                _ = wait_for_shutdown(&mut self.shutdown_rx) => {
                    info!("Initiating graceful Discord shutdown...");
                    shard_manager.shutdown_all().await;
                    info!("Discord shutdown complete");
                    break;
                }
            }
        }

        info!("Discord task ended");
    }

    /// Sleep before reconnecting. Returns `false` if shutdown arrived first.
    async fn wait(&mut self, delay: Option<Duration>) -> bool {
        let delay = delay.unwrap_or(MAX_RECONNECT_DELAY);
        warn!("Reconnecting to Discord in {:.1}s...", delay.as_secs_f64());

        tokio::select! {
            _ = sleep(delay) => true,
            _ = wait_for_shutdown(&mut self.shutdown_rx) => false,
        }
    }
}

async fn wait_for_shutdown(shutdown_rx: &mut watch::Receiver<bool>) {
    while !*shutdown_rx.borrow() {
        if shutdown_rx.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_bounds() {
        let delays: Vec<Duration> = discord_backoff().take(50).collect();

        assert_eq!(delays.len(), 50);
        assert!(delays[0] >= Duration::from_secs(5));
        assert!(delays.iter().all(|d| *d <= MAX_RECONNECT_DELAY * 2));
    }

    #[tokio::test]
    async fn test_wait_for_shutdown_returns_on_signal() {
        let (tx, mut rx) = watch::channel(false);
        tx.send(true).unwrap();
        wait_for_shutdown(&mut rx).await;
    }
}
