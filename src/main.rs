//! dsrv-bridge - game server to Discord chat bridge
//!
//! Accepts a connection from the game server plugin, relays chat, deaths,
//! progress and join/leave messages to linked Discord channels, and relays
//! Discord messages back into the game.

mod bridge;
mod common;
mod config;
mod discord;
mod listener;
mod platform;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::runtime::Handle;
use tokio::signal;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use bridge::{
    Bridge, BridgeContext, GlobalChatTranslator, LocalChatChannelLinker, LocalPlayerUserLinker,
    NamedChannelTranslator, OutboundFormatter, PlayerLookup, PlayerUserLinker,
    UplinkedPlayerUserLinker,
};
use common::types::RemoteChannel;
use config::{get_config_path, load_and_validate};
use discord::{build_http, DiscordBot, DiscordRemote};
use platform::{Capabilities, EventBus, PlatformConnector, PlatformHandle};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("dsrv-bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Please ensure {} exists and is properly formatted.", config_path);
        e
    })?;

    let api_version = config.platform.api_version()?;
    info!("Configuration loaded successfully");
    info!("  Platform listen: {}", config.platform.listen);
    info!("  Platform API: {}", api_version);
    info!("  Channel links: {}", config.channels.len());
    info!("  User links: {}", config.users.len());

    let capabilities = Capabilities::detect(&api_version);

    // ============================================================
    // Assemble the bridge
    // ============================================================
    let (platform, commands_rx) = PlatformHandle::channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let players = Arc::new(PlayerLookup::new());
    let player_user_linker: Arc<dyn PlayerUserLinker> = if config.bridge.remote_linker {
        info!("Linking Discord users to players by name");
        Arc::new(UplinkedPlayerUserLinker::new(players.clone()))
    } else {
        Arc::new(LocalPlayerUserLinker::from_config(&config.users, players.clone()))
    };

    let http = Arc::new(build_http(&config.discord.token)?);

    let context = BridgeContext::builder()
        .chat_channel_linker(Arc::new(LocalChatChannelLinker::from_config(&config.channels)))
        .player_user_linker(player_user_linker)
        .players(players)
        .formatter(OutboundFormatter::from_config(&config.bridge))
        .executor(Handle::current())
        .remote(Arc::new(DiscordRemote::new(http, Handle::current())))
        .platform(platform.clone())
        .console_channel(config.discord.console_channel.map(RemoteChannel))
        .build()?;

    context
        .registry()
        .add_translator(Arc::new(GlobalChatTranslator::new(platform.clone())));
    context
        .registry()
        .add_translator(Arc::new(NamedChannelTranslator::new(platform)));

    let bridge = Bridge::new(Arc::new(context));

    let mut bus = EventBus::new();
    listener::register_listeners(
        &mut bus,
        &config.listeners,
        &capabilities,
        Arc::new(bridge.clone()),
        bridge.context().players().clone(),
    );

    info!("Listeners: {}", bus.listener_names().join(", "));

    // ============================================================
    // Start Discord bot and platform connector
    // ============================================================
    info!("Starting Discord bot...");
    let discord_bot = DiscordBot::new(config.discord.token.clone(), bridge, shutdown_rx.clone());
    let mut discord_task = tokio::spawn(discord_bot.run());

    let connector = PlatformConnector::new(config.platform.listen.clone(), bus, commands_rx);
    let mut platform_task = tokio::spawn(connector.run(shutdown_rx));

    // ============================================================
    // Run until a signal or a task exits
    // ============================================================
    let shutdown = tokio::select! {
        biased;
        _ = shutdown_signal() => {
            info!("Shutdown signal received - stopping...");
            true
        }
        result = &mut platform_task => {
            match result {
                Ok(Ok(())) => info!("Platform connector exited"),
                Ok(Err(e)) => error!("Platform connector failed: {}", e),
                Err(e) => error!("Platform connector task panicked: {}", e),
            }
            false
        }
        _ = &mut discord_task => false,
    };

    // Signal every task (fire-and-forget - receivers may already be gone)
    if let Err(e) = shutdown_tx.send(true) {
        debug!("Shutdown channel closed: {}", e);
    }

    if shutdown {
        let timeout = Duration::from_secs(5);
        match tokio::time::timeout(timeout, discord_task).await {
            Ok(Ok(())) => info!("Discord disconnected gracefully"),
            Ok(Err(e)) => warn!("Discord task panicked: {}", e),
            Err(_) => warn!("Discord shutdown timed out"),
        }
        if tokio::time::timeout(timeout, platform_task).await.is_err() {
            warn!("Platform connector shutdown timed out");
        }
    }

    info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
