//! Game server side of the bridge.

pub mod bus;
pub mod capability;
pub mod connector;
pub mod console;
pub mod events;

pub use bus::EventBus;
pub use capability::Capabilities;
pub use connector::{PlatformConnector, PlatformHandle};
