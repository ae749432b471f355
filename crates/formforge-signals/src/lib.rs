//! # formforge-signals
//!
//! A small signal dispatcher. Components publish notifications (for example
//! "the document changed") without knowing who listens; views that need to
//! re-render subscribe by connecting a receiver.
//!
//! ## Usage
//!
//! ```
//! use formforge_signals::Signal;
//! use std::sync::Arc;
//!
//! struct FormSaved;
//!
//! let signal: Signal<FormSaved> = Signal::new();
//!
//! signal.connect("toast", Arc::new(|_sender: &FormSaved| {
//!     println!("Form saved successfully");
//! }));
//!
//! assert_eq!(signal.send(&FormSaved), 1);
//! ```

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A connected callback. `Send + Sync` so a signal can sit in shared state.
pub type Receiver<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Named receivers of payloads of type `T`, called in connection order.
///
/// A receiver that panicked while the list was locked does not disable the
/// signal; the list is used as it was left.
pub struct Signal<T: 'static> {
    receivers: RwLock<Vec<(String, Receiver<T>)>>,
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("receivers", &self.receiver_ids())
            .finish()
    }
}

impl<T: 'static> Signal<T> {
    /// Creates a new signal with no connected receivers.
    pub fn new() -> Self {
        Self {
            receivers: RwLock::new(Vec::new()),
        }
    }

    /// Connects `callback` under `id`. Connecting an id twice replaces the
    /// earlier callback and keeps its position.
    pub fn connect(&self, id: impl Into<String>, callback: Receiver<T>) {
        let id = id.into();
        let mut receivers = self.write();
        match receivers.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = callback,
            None => receivers.push((id, callback)),
        }
    }

    /// Returns `true` if a receiver with `id` was connected.
    pub fn disconnect(&self, id: &str) -> bool {
        let mut receivers = self.write();
        let before = receivers.len();
        receivers.retain(|(existing, _)| existing != id);
        receivers.len() != before
    }

    /// Sends the signal to all connected receivers, in connection order.
    ///
    /// The receiver list is snapshotted first, so a receiver may connect or
    /// disconnect receivers (itself included) without deadlocking; such
    /// changes take effect from the next send. Returns the number of
    /// receivers called.
    pub fn send(&self, payload: &T) -> usize {
        let snapshot: Vec<Receiver<T>> = self
            .read()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        tracing::trace!(receivers = snapshot.len(), "dispatching signal");
        for callback in &snapshot {
            callback(payload);
        }
        snapshot.len()
    }

    pub fn receiver_count(&self) -> usize {
        self.read().len()
    }

    /// Connected receiver ids, in connection order.
    pub fn receiver_ids(&self) -> Vec<String> {
        self.read()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<(String, Receiver<T>)>> {
        self.receivers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<(String, Receiver<T>)>> {
        self.receivers.write().unwrap_or_else(PoisonError::into_inner)
    }
}
