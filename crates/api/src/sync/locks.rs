//! Lazily-created per-room exclusive locks.

use std::collections::HashMap;
use std::sync::Arc;

use sketchrelay_core::types::RoomId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Hands out one exclusive lock per room, created on first use.
///
/// The outer mutex guards only the map and is held for the duration of a
/// lookup; waiting on a room's lock never blocks other rooms. There is no
/// global lock.
#[derive(Default)]
pub struct RoomLocks {
    locks: Mutex<HashMap<RoomId, Arc<Mutex<()>>>>,
}

impl RoomLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the exclusive lock for `room_id`, creating it on first use.
    ///
    /// The guard is owned, so it can be held across awaits and is released
    /// on drop — on success and failure paths alike.
    pub async fn acquire(&self, room_id: RoomId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(room_id).or_default())
        };
        lock.lock_owned().await
    }
}
