//! Outbound side of the bridge.

use crate::common::callback::Callback;
use crate::common::types::RemoteChannel;

/// A chat network messages are bridged to.
pub trait RemoteNetwork: Send + Sync {
    /// Post one message to a channel. Completes once delivery has
    /// succeeded or failed.
    fn send(&self, channel: &RemoteChannel, text: String, callback: Callback<()>);
}
