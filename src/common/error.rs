//! Error types for the application.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Failures delivered through a [`Callback`](crate::common::callback::Callback).
///
/// These never cross an async boundary as a returned error; they are always
/// handed to the continuation of the operation that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("No chat endpoint resolved")]
    NoEndpoint,

    #[error("Chat endpoint '{endpoint}' is not linked to a remote channel")]
    Unmapped { endpoint: String },

    #[error("Remote channel {channel} is not linked to a chat endpoint")]
    UnmappedRemote { channel: u64 },

    #[error("Callback dropped without completion")]
    Abandoned,

    #[error("Translator failed: {message}")]
    Translator { message: String },

    #[error("Platform connection closed")]
    PlatformClosed,

    #[error("Delivery failed: {message}")]
    Delivery { message: String },

    #[error("Bridge context is missing its {name}")]
    MissingCollaborator { name: &'static str },
}

impl From<serenity::Error> for BridgeError {
    fn from(e: serenity::Error) -> Self {
        BridgeError::Delivery {
            message: e.to_string(),
        }
    }
}

/// Errors on the game server socket.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line codec error: {0}")]
    Codec(#[from] tokio_util::codec::LinesCodecError),

    #[error("Failed to encode command: {0}")]
    Encode(#[from] serde_json::Error),
}
