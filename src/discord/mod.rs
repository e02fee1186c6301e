//! Discord bot integration.

pub mod client;
pub mod handler;
pub mod remote;

pub use client::{build_http, DiscordBot};
pub use remote::DiscordRemote;
