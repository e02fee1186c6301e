//! First-success fan-out over continuation-style candidates.
//!
//! Every candidate is started with its own private callback. The first one
//! to succeed with a value completes the downstream callback; any later
//! results are discarded. If every started candidate declines or fails, the
//! downstream receives a single failure: the last error seen, or
//! [`BridgeError::NoEndpoint`] when all of them only declined.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::common::callback::{Callback, Outcome};
use crate::common::error::BridgeError;

/// One way of producing a value, bound to its input and waiting for a callback.
pub type Candidate<T> = Box<dyn FnOnce(Callback<T>) + Send + 'static>;

struct FanOut<T> {
    downstream: Mutex<Option<Callback<T>>>,
    remaining: AtomicUsize,
    last_error: Mutex<Option<BridgeError>>,
}

impl<T: Send + 'static> FanOut<T> {
    fn take_downstream(&self) -> Option<Callback<T>> {
        self.downstream
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn is_resolved(&self) -> bool {
        self.downstream
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn report(&self, outcome: Outcome<T>) {
        match outcome {
            Ok(Some(value)) => match self.take_downstream() {
                Some(downstream) => downstream.success(Some(value)),
                None => debug!("Discarding late candidate result"),
            },
            Ok(None) => {}
            Err(e) => {
                debug!("Candidate failed: {}", e);
                *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(e);
            }
        }

        self.finish_one();
    }

    fn finish_one(&self) {
        if self.remaining.fetch_sub(1, Ordering::AcqRel) != 1 {
            return;
        }

        if let Some(downstream) = self.take_downstream() {
            let error = self
                .last_error
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take()
                .unwrap_or(BridgeError::NoEndpoint);
            downstream.failure(error);
        }
    }
}

/// Race `candidates` and complete `downstream` with the first success.
pub fn first_success<T: Send + 'static>(candidates: Vec<Candidate<T>>, downstream: Callback<T>) {
    if candidates.is_empty() {
        downstream.failure(BridgeError::NoEndpoint);
        return;
    }

    let state = Arc::new(FanOut {
        downstream: Mutex::new(Some(downstream)),
        remaining: AtomicUsize::new(candidates.len()),
        last_error: Mutex::new(None),
    });

    for (index, candidate) in candidates.into_iter().enumerate() {
        if state.is_resolved() {
            debug!("Skipping candidate {}, already resolved", index);
            state.finish_one();
            continue;
        }

        let reporter = Arc::clone(&state);
        let callback = Callback::new(move |outcome| reporter.report(outcome));

        // The private callback is dropped during unwinding and reports Abandoned.
        if catch_unwind(AssertUnwindSafe(|| candidate(callback))).is_err() {
            warn!("Candidate {} panicked", index);
        }
    }
}
