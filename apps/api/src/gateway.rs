//! Uniform pending/result/failure envelope around a network-bound operation.
//!
//! Invocations are neither queued nor cancelled. Each one writes its outcome when it
//! settles, so the visible state is whatever settled last, which need not be the call
//! that started last.

use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// Snapshot of one wrapped action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionState<T> {
    pub pending: bool,
    pub result: Option<T>,
    pub failure: Option<String>,
}

impl<T> Default for ActionState<T> {
    fn default() -> Self {
        Self {
            pending: false,
            result: None,
            failure: None,
        }
    }
}

#[derive(Debug)]
struct Inner<T> {
    in_flight: usize,
    result: Option<T>,
    failure: Option<String>,
}

/// Cloning shares the underlying state.
#[derive(Debug)]
pub struct RemoteAction<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for RemoteAction<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for RemoteAction<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RemoteAction<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                in_flight: 0,
                result: None,
                failure: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> InFlight<'_, T> {
        let mut inner = self.lock();
        inner.in_flight += 1;
        inner.failure = None;
        InFlight { action: self }
    }
}

/// Counts one invocation as in flight until dropped, whether it settled or was cancelled.
struct InFlight<'a, T> {
    action: &'a RemoteAction<T>,
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        let mut inner = self.action.lock();
        inner.in_flight = inner.in_flight.saturating_sub(1);
    }
}

impl<T: Clone> RemoteAction<T> {
    pub fn snapshot(&self) -> ActionState<T> {
        let inner = self.lock();
        ActionState {
            pending: inner.in_flight > 0,
            result: inner.result.clone(),
            failure: inner.failure.clone(),
        }
    }

    /// Runs `operation`, recording its outcome, and hands the outcome back to the caller.
    ///
    /// A failure is stored as its display text and also returned, so the caller can
    /// surface it. A previous `result` stays visible until a later success replaces it.
    /// Dropping the returned future before it settles records nothing but still clears
    /// its share of `pending`.
    pub async fn run<F, E>(&self, operation: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let in_flight = self.begin();
        let outcome = operation.await;

        let mut inner = self.lock();
        match &outcome {
            Ok(value) => {
                inner.result = Some(value.clone());
                inner.failure = None;
            }
            Err(e) => inner.failure = Some(e.to_string()),
        }
        drop(inner);
        drop(in_flight);
        outcome
    }
}
