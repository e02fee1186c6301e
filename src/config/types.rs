//! Configuration type definitions.

use semver::Version;
use serde::Deserialize;
use uuid::Uuid;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub listeners: ListenersConfig,
    /// Chat endpoint to Discord channel links.
    #[serde(default)]
    pub channels: Vec<ChannelLink>,
    /// Player to Discord user links.
    #[serde(default)]
    pub users: Vec<UserLink>,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    pub token: String,
    /// Messages posted here run as server console commands.
    pub console_channel: Option<u64>,
}

/// Game server connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Platform API version, used to detect optional features.
    #[serde(default = "default_version")]
    pub version: String,
}

impl PlatformConfig {
    pub fn api_version(&self) -> Result<Version, semver::Error> {
        Version::parse(&self.version)
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            version: default_version(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:25580".to_string()
}

fn default_version() -> String {
    "7.1.0".to_string()
}

/// Bridging behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    /// Resolve Discord users to players by name instead of `users` links.
    #[serde(default)]
    pub remote_linker: bool,
    /// Format for messages with a player behind them.
    #[serde(default = "default_attributed_format")]
    pub attributed_format: String,
    /// Format for system messages.
    #[serde(default = "default_system_format")]
    pub system_format: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            remote_linker: false,
            attributed_format: default_attributed_format(),
            system_format: default_system_format(),
        }
    }
}

fn default_attributed_format() -> String {
    "%message (%user)".to_string()
}

fn default_system_format() -> String {
    "%message".to_string()
}

/// Per-listener switches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListenersConfig {
    #[serde(default)]
    pub chat: ToggleConfig,
    #[serde(default)]
    pub death: ToggleConfig,
    #[serde(default)]
    pub advancement: ToggleConfig,
    #[serde(default)]
    pub join_leave: JoinLeaveConfig,
    #[serde(default)]
    pub channel: ChannelListenerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinLeaveConfig {
    #[serde(default = "default_true")]
    pub join_enabled: bool,
    #[serde(default = "default_true")]
    pub leave_enabled: bool,
}

impl Default for JoinLeaveConfig {
    fn default() -> Self {
        Self {
            join_enabled: true,
            leave_enabled: true,
        }
    }
}

/// Catch-all listener for message events.
///
/// `events` holds type name prefixes. With `blacklist = true` matching events
/// are dropped, otherwise only matching events pass.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelListenerConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub blacklist: bool,
    #[serde(default)]
    pub events: Vec<String>,
}

impl Default for ChannelListenerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            blacklist: true,
            events: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Links a chat endpoint id (e.g. `global`, `world:nether`) to a Discord channel.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelLink {
    pub chat: String,
    pub discord: u64,
}

/// Links a player to a Discord user.
#[derive(Debug, Clone, Deserialize)]
pub struct UserLink {
    pub player: Uuid,
    pub discord: u64,
}
