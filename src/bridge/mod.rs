//! Bridging between in-game chats and Discord channels.
//!
//! ## Module Structure
//!
//! - `endpoint`: In-game chat endpoints
//! - `translators`: Destination to endpoint translators
//! - `fanout`: First-success combinator used by resolution
//! - `lookup`: Translator registry and known chats
//! - `linker`: Endpoint to Discord channel links
//! - `users`: Online players and Discord user links
//! - `formatter`: Outbound text formatting
//! - `remote`: Outbound network seam
//! - `context`: Shared collaborators
//! - `pipeline`: The `Bridge` itself

pub mod context;
pub mod endpoint;
pub mod fanout;
pub mod formatter;
pub mod linker;
pub mod lookup;
pub mod pipeline;
pub mod remote;
pub mod translators;
pub mod users;

pub use context::BridgeContext;
pub use formatter::OutboundFormatter;
pub use linker::LocalChatChannelLinker;
pub use pipeline::Bridge;
pub use translators::{GlobalChatTranslator, NamedChannelTranslator};
pub use users::{
    LocalPlayerUserLinker, PlayerLookup, PlayerUserLinker, UplinkedPlayerUserLinker,
};
