//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `DSRV_DISCORD_TOKEN` - Discord bot token
//! - `DSRV_PLATFORM_LISTEN` - Address the game server connects to
//! - `DSRV_PLATFORM_VERSION` - Platform API version

use std::env;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "DSRV";

/// Apply environment variable overrides to a config.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(token) = env::var(format!("{}_DISCORD_TOKEN", ENV_PREFIX)) {
        config.discord.token = token;
    }
    if let Ok(listen) = env::var(format!("{}_PLATFORM_LISTEN", ENV_PREFIX)) {
        config.platform.listen = listen;
    }
    if let Ok(version) = env::var(format!("{}_PLATFORM_VERSION", ENV_PREFIX)) {
        config.platform.version = version;
    }

    config
}

/// Get the config file path from environment or use default.
///
/// Checks `DSRV_CONFIG`, otherwise returns "dsrv.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "dsrv.conf".to_string())
}
