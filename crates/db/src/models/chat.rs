//! Persisted drawing-event model.

use serde::Serialize;
use sketchrelay_core::types::{DbId, RoomId, Timestamp};
use sqlx::FromRow;

/// A row from the `chats` table: one opaque drawing event scoped to a room.
///
/// Serializes to camelCase (`roomId`, `userId`) to match the wire format
/// deployed clients already parse.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEvent {
    /// BIGSERIAL primary key; strictly increasing per room by construction.
    pub id: DbId,
    pub room_id: RoomId,
    pub user_id: DbId,
    /// Opaque payload. The sync core never interprets it.
    pub message: String,
    pub created_at: Timestamp,
}
