//! Single-shot continuations.
//!
//! Every potentially slow step of the bridge (translator resolution, linking,
//! remote delivery) takes a [`Callback`] instead of returning a value. A
//! callback is completed exactly once:
//!
//! - completing consumes it, so a second completion does not type-check;
//! - dropping it uncompleted completes it with [`BridgeError::Abandoned`],
//!   so a path that is expected to terminate always reaches its continuation.

use std::fmt;

use tokio::sync::oneshot;

use crate::common::error::BridgeError;

/// Result handed to a continuation. `Ok(None)` means "nothing here" and is
/// not an error.
pub type Outcome<T> = Result<Option<T>, BridgeError>;

type Continuation<T> = Box<dyn FnOnce(Outcome<T>) + Send + 'static>;

/// An owned continuation, completed exactly once.
pub struct Callback<T> {
    continuation: Option<Continuation<T>>,
}

impl<T: Send + 'static> Callback<T> {
    /// Wrap a closure as a callback.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Outcome<T>) + Send + 'static,
    {
        Self {
            continuation: Some(Box::new(f)),
        }
    }

    /// Pair a callback with a receiver so the outcome can be awaited.
    ///
    /// The receiver never observes a closed channel: dropping the callback
    /// still sends [`BridgeError::Abandoned`].
    pub fn channel() -> (Self, oneshot::Receiver<Outcome<T>>) {
        let (tx, rx) = oneshot::channel();
        let callback = Self::new(move |outcome| {
            // Receiver gone means nobody is waiting any more.
            let _ = tx.send(outcome);
        });
        (callback, rx)
    }

    /// Complete with a value (or with "nothing here" for `None`).
    pub fn success(self, value: Option<T>) {
        self.complete(Ok(value));
    }

    /// Complete with a failure.
    pub fn failure(self, error: BridgeError) {
        self.complete(Err(error));
    }

    /// Complete with an already-built outcome.
    pub fn complete(mut self, outcome: Outcome<T>) {
        if let Some(continuation) = self.continuation.take() {
            continuation(outcome);
        }
    }
}

impl<T> Drop for Callback<T> {
    fn drop(&mut self) {
        if let Some(continuation) = self.continuation.take() {
            continuation(Err(BridgeError::Abandoned));
        }
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("pending", &self.continuation.is_some())
            .finish()
    }
}

/// Anything with a display name and a unique identifier, both served through
/// continuations.
pub trait Named {
    /// Fetch the display name.
    fn name(&self, callback: Callback<String>);

    /// Fetch the unique identifier.
    #[cfg(test)]
    fn unique_id(&self, callback: Callback<String>);
}
