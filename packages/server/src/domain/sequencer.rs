//! Serialization of state changes with their notifications.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Shared lock ordering every registry/history change together with the
/// fanout that announces it.
///
/// Held across the change and the fanout. Fanout only enqueues onto
/// per-connection channels, so the lock never spans a socket write.
/// Clones share the same lock.
#[derive(Debug, Clone, Default)]
pub struct BroadcastSequencer {
    lock: Arc<Mutex<()>>,
}

impl BroadcastSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}
