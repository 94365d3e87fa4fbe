//! # Input Queue
//!
//! The input collaborator pushes events; the frame loop drains them at the
//! top of every frame.
//!
//! ```text
//! ┌─────────────┐  try_send  ┌─────────────┐  drain   ┌─────────────┐
//! │ host events │───────────>│   bounded   │─────────>│ frame loop  │
//! │ (pointer,…) │            │   channel   │          │ (1 / frame) │
//! └─────────────┘            └─────────────┘          └─────────────┘
//! ```
//!
//! A full queue drops the event instead of stalling the host. Pointer
//! samples are superseded by the next one anyway.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use lumen_shared::InputEvent;

/// Default queue capacity.
pub const DEFAULT_INPUT_CAPACITY: usize = 1024;

/// Bounded event queue between the host and the frame loop.
pub struct InputQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
    dropped: Arc<AtomicU64>,
}

impl InputQueue {
    /// Creates a queue holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> InputSender {
        InputSender {
            sender: self.sender.clone(),
            dropped: Arc::clone(&self.dropped),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> InputReceiver {
        InputReceiver {
            receiver: self.receiver.clone(),
            dropped: Arc::clone(&self.dropped),
        }
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_CAPACITY)
    }
}

/// Handle for delivering events.
#[derive(Clone)]
pub struct InputSender {
    sender: Sender<InputEvent>,
    dropped: Arc<AtomicU64>,
}

impl InputSender {
    /// Queues an event (non-blocking).
    ///
    /// Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: InputEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }
}

/// Handle for consuming events.
#[derive(Clone)]
pub struct InputReceiver {
    receiver: Receiver<InputEvent>,
    dropped: Arc<AtomicU64>,
}

impl InputReceiver {
    /// Receives one event (non-blocking).
    #[inline]
    pub fn try_recv(&self) -> Option<InputEvent> {
        self.receiver.try_recv().ok()
    }

    /// Iterates over everything queued right now.
    pub fn drain(&self) -> impl Iterator<Item = InputEvent> + '_ {
        self.receiver.try_iter()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Events dropped because the queue was full.
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
