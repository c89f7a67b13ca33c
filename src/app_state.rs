use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::link::messages::StatusSnapshot;

/// State shared between the link task and whatever renders status
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub snapshot: Option<StatusSnapshot>,
    pub connected: bool,
    pub messages_received: u64,
    pub snapshots_published: u64,
    pub messages_ignored: u64,
    pub messages_malformed: u64,
}

/// Cloneable handle to the shared [`AppState`].
///
/// The link is the only writer. Readers take copies and must cope with the
/// snapshot being absent or stale.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    inner: Arc<Mutex<AppState>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        // Every write leaves the state consistent, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the current snapshot.
    pub fn publish(&self, snapshot: StatusSnapshot) {
        let mut state = self.lock();
        state.snapshot = Some(snapshot);
        state.snapshots_published += 1;
    }

    pub fn set_connected(&self, connected: bool) {
        self.lock().connected = connected;
    }

    pub fn record_received(&self) {
        self.lock().messages_received += 1;
    }

    pub fn record_ignored(&self) {
        self.lock().messages_ignored += 1;
    }

    pub fn record_malformed(&self) {
        self.lock().messages_malformed += 1;
    }

    pub fn snapshot(&self) -> Option<StatusSnapshot> {
        self.lock().snapshot.clone()
    }

    pub fn state(&self) -> AppState {
        self.lock().clone()
    }
}
