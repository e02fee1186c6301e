//! Server console access.

use tracing::info;

use crate::common::error::BridgeError;
use crate::platform::connector::PlatformHandle;
use crate::platform::events::PlatformCommand;

/// Runs commands on the game server as the console.
#[derive(Debug, Clone)]
pub struct Console {
    platform: PlatformHandle,
}

impl Console {
    pub fn new(platform: PlatformHandle) -> Self {
        Self { platform }
    }

    pub fn invoke(&self, command: &str) -> Result<(), BridgeError> {
        let command = command.trim().trim_start_matches('/');
        info!("Console command: {}", command);
        self.platform.send(PlatformCommand::Console {
            command: command.to_string(),
        })
    }
}
