//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    // Discord
    if config.discord.token.is_empty() {
        errors.push("discord.token is required".to_string());
    }
    if config.discord.token == "YOUR_DISCORD_TOKEN_HERE" {
        errors.push("discord.token has not been configured (still using placeholder)".to_string());
    }
    if config.discord.console_channel == Some(0) {
        errors.push("discord.console_channel must be non-zero".to_string());
    }

    // Platform
    if config.platform.listen.parse::<SocketAddr>().is_err() {
        errors.push(format!(
            "platform.listen '{}' is not a valid socket address",
            config.platform.listen
        ));
    }
    if let Err(e) = config.platform.api_version() {
        errors.push(format!(
            "platform.version '{}' is not a valid version: {}",
            config.platform.version, e
        ));
    }

    // Formats
    if !config.bridge.attributed_format.contains("%message") {
        errors.push("bridge.attributed_format must contain %message".to_string());
    }
    if !config.bridge.system_format.contains("%message") {
        errors.push("bridge.system_format must contain %message".to_string());
    }

    // Channel links must be one-to-one
    let mut chats = HashSet::new();
    let mut discord_channels = HashSet::new();
    for (i, link) in config.channels.iter().enumerate() {
        if link.chat.is_empty() {
            errors.push(format!("channels[{}].chat is required", i));
        } else if !chats.insert(link.chat.as_str()) {
            errors.push(format!("channels[{}].chat '{}' is linked twice", i, link.chat));
        }

        if link.discord == 0 {
            errors.push(format!("channels[{}].discord must be non-zero", i));
        } else if !discord_channels.insert(link.discord) {
            errors.push(format!(
                "channels[{}].discord {} is linked twice",
                i, link.discord
            ));
        }

        if config.discord.console_channel == Some(link.discord) {
            errors.push(format!(
                "channels[{}].discord {} is also the console channel",
                i, link.discord
            ));
        }
    }

    // User links
    let mut users = HashSet::new();
    for (i, link) in config.users.iter().enumerate() {
        if link.discord == 0 {
            errors.push(format!("users[{}].discord must be non-zero", i));
        } else if !users.insert(link.discord) {
            errors.push(format!("users[{}].discord {} is linked twice", i, link.discord));
        }
    }

    if config.listeners.channel.enabled
        && !config.listeners.channel.blacklist
        && config.listeners.channel.events.is_empty()
    {
        errors.push(
            "listeners.channel is a whitelist with no events - nothing would be bridged"
                .to_string(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}
