//! Per-room undo/redo against the persisted event store.

use std::collections::HashMap;

use sketchrelay_core::error::CoreError;
use sketchrelay_core::types::RoomId;
use sketchrelay_db::models::chat::ChatEvent;
use sketchrelay_db::repositories::ChatRepo;
use sketchrelay_db::DbPool;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::AppResult;
use crate::sync::locks::RoomLocks;
use crate::ws::protocol::ServerFrame;
use crate::ws::WsManager;

/// In-memory LIFO stacks for one room. Created lazily on first undo/redo,
/// reset on process restart.
#[derive(Default)]
struct RoomStacks {
    /// Events removed by undo, most recent last.
    undo: Vec<ChatEvent>,
    /// Events re-created by redo, most recent last.
    redo: Vec<ChatEvent>,
}

/// Coordinates undo/redo for all rooms.
///
/// One instance per process, shared through `AppState` — the stacks are
/// owned state, never ambient globals. The coordinator also owns the
/// per-room locks that serialize undo, redo, and chat appends for the same
/// room; unrelated rooms never contend.
pub struct SyncCoordinator {
    stacks: Mutex<HashMap<RoomId, RoomStacks>>,
    locks: RoomLocks,
}

impl SyncCoordinator {
    pub fn new() -> Self {
        Self {
            stacks: Mutex::new(HashMap::new()),
            locks: RoomLocks::new(),
        }
    }

    /// Acquire the exclusive per-room lock.
    ///
    /// The chat append path takes this same lock, so an undo or redo never
    /// interleaves with an append for the same room.
    pub async fn lock_room(&self, room_id: RoomId) -> OwnedMutexGuard<()> {
        self.locks.acquire(room_id).await
    }

    /// Remove the most recently persisted event for `room_id`.
    ///
    /// The removed event is pushed onto the room's undo stack and announced
    /// to current subscribers through the same fan-out chat uses. Fails with
    /// [`CoreError::NothingToUndo`] when the room has no events, mutating
    /// neither the store nor the stacks.
    pub async fn undo(
        &self,
        pool: &DbPool,
        registry: &WsManager,
        room_id: RoomId,
    ) -> AppResult<ChatEvent> {
        let _room = self.lock_room(room_id).await;

        let latest = ChatRepo::find_latest(pool, room_id)
            .await?
            .ok_or(CoreError::NothingToUndo)?;

        ChatRepo::delete_by_id(pool, latest.id).await?;

        {
            let mut stacks = self.stacks.lock().await;
            stacks.entry(room_id).or_default().undo.push(latest.clone());
        }

        registry
            .broadcast_to_room(room_id, ServerFrame::undo(&latest).to_message())
            .await;
        tracing::info!(room_id, event_id = latest.id, "Undo applied");

        Ok(latest)
    }

    /// Re-apply the most recently undone event for `room_id`.
    ///
    /// The payload is appended again under a fresh id (identity is not
    /// preserved across an undo/redo cycle), moved to the room's redo stack,
    /// and announced to current subscribers. Fails with
    /// [`CoreError::NothingToRedo`] when the undo stack is empty, creating
    /// no event.
    pub async fn redo(
        &self,
        pool: &DbPool,
        registry: &WsManager,
        room_id: RoomId,
    ) -> AppResult<ChatEvent> {
        let _room = self.lock_room(room_id).await;

        // Read the top of the undo stack but leave it in place until the
        // append succeeds, so a transient persistence failure does not lose
        // the undone event.
        let undone = {
            let stacks = self.stacks.lock().await;
            stacks
                .get(&room_id)
                .and_then(|s| s.undo.last().cloned())
                .ok_or(CoreError::NothingToRedo)?
        };

        let restored =
            ChatRepo::append(pool, undone.room_id, undone.user_id, &undone.message).await?;

        {
            let mut stacks = self.stacks.lock().await;
            let room = stacks.entry(room_id).or_default();
            room.undo.pop();
            room.redo.push(restored.clone());
        }

        registry
            .broadcast_to_room(room_id, ServerFrame::redo(&restored).to_message())
            .await;
        tracing::info!(
            room_id,
            event_id = restored.id,
            undone_id = undone.id,
            "Redo applied"
        );

        Ok(restored)
    }

    /// Depth of a room's undo stack. Exposed for tests and diagnostics.
    pub async fn undo_depth(&self, room_id: RoomId) -> usize {
        self.stacks
            .lock()
            .await
            .get(&room_id)
            .map_or(0, |s| s.undo.len())
    }

    /// Depth of a room's redo stack. Exposed for tests and diagnostics.
    pub async fn redo_depth(&self, room_id: RoomId) -> usize {
        self.stacks
            .lock()
            .await
            .get(&room_id)
            .map_or(0, |s| s.redo.len())
    }
}

impl Default for SyncCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
