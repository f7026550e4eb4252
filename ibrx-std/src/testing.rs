//! Testing utilities for ibrx.
//!
//! - [`RecordingListener`]: records every message it receives
//! - [`FailingListener`]: fails on every message, after recording it

use ibrx_core::{BoxError, Listener, ListenerRef, Message};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Log = Arc<Mutex<Vec<Message>>>;

fn lock(log: &Log) -> MutexGuard<'_, Vec<Message>> {
    log.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Recorder {
    log: Log,
    failure: Option<String>,
}

impl Listener for Recorder {
    fn on_message(&self, message: &Message) -> Result<(), BoxError> {
        lock(&self.log).push(message.clone());
        match &self.failure {
            Some(reason) => Err(reason.clone().into()),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records all messages it receives.
///
/// Clones share the same log and the same [`handle`](Self::handle), so a
/// clone can be registered while the original is inspected.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::new();
/// receiver.register(&recorder.handle(), ["TickPrice"]);
///
/// receiver.invoke("tickPrice", vec![42.into(), 1.into(), 101.5.into()])?;
///
/// assert_eq!(recorder.count(), 1);
/// ```
#[derive(Clone)]
pub struct RecordingListener {
    log: Log,
    handle: ListenerRef,
}

impl RecordingListener {
    /// Create a new recording listener.
    pub fn new() -> Self {
        let log = Log::default();
        let handle = ListenerRef::new(Recorder {
            log: log.clone(),
            failure: None,
        });
        Self { log, handle }
    }

    /// The handle to register with a receiver.
    pub fn handle(&self) -> ListenerRef {
        self.handle.clone()
    }

    /// Get a clone of the recorded messages.
    pub fn messages(&self) -> Vec<Message> {
        lock(&self.log).clone()
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<Message> {
        lock(&self.log).last().cloned()
    }

    /// Get the number of recorded messages.
    pub fn count(&self) -> usize {
        lock(&self.log).len()
    }

    /// Clear all recorded messages.
    pub fn clear(&self) {
        lock(&self.log).clear();
    }
}

impl Default for RecordingListener {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Failing Listener
// ============================================================================

/// A listener that records each message and then fails with a fixed reason.
#[derive(Clone)]
pub struct FailingListener {
    log: Log,
    handle: ListenerRef,
}

impl FailingListener {
    /// Create a listener failing with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        let log = Log::default();
        let handle = ListenerRef::new(Recorder {
            log: log.clone(),
            failure: Some(reason.into()),
        });
        Self { log, handle }
    }

    /// The handle to register with a receiver.
    pub fn handle(&self) -> ListenerRef {
        self.handle.clone()
    }

    /// Get the number of messages it was handed.
    pub fn count(&self) -> usize {
        lock(&self.log).len()
    }
}
