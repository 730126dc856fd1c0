//! Repository for the `chats` table — the append-only room event store.

use sketchrelay_core::types::{DbId, RoomId};
use sqlx::PgPool;

use crate::models::chat::ChatEvent;

/// Column list for `chats` queries.
const CHAT_COLUMNS: &str = "id, room_id, user_id, message, created_at";

/// Read/write operations for room-scoped drawing events.
///
/// Per-room ordering is carried entirely by the BIGSERIAL `id`: PostgreSQL
/// assigns ids atomically, so concurrent appends to the same room always
/// observe strictly increasing ids.
pub struct ChatRepo;

impl ChatRepo {
    /// Append an event, returning the stored row with its assigned id.
    pub async fn append(
        pool: &PgPool,
        room_id: RoomId,
        user_id: DbId,
        message: &str,
    ) -> Result<ChatEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO chats (room_id, user_id, message) VALUES ($1, $2, $3) \
             RETURNING {CHAT_COLUMNS}"
        );
        sqlx::query_as::<_, ChatEvent>(&query)
            .bind(room_id)
            .bind(user_id)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// Fetch the highest-id event for a room, if any.
    pub async fn find_latest(
        pool: &PgPool,
        room_id: RoomId,
    ) -> Result<Option<ChatEvent>, sqlx::Error> {
        let query =
            format!("SELECT {CHAT_COLUMNS} FROM chats WHERE room_id = $1 ORDER BY id DESC LIMIT 1");
        sqlx::query_as::<_, ChatEvent>(&query)
            .bind(room_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event by id. Deleting an id that no longer exists is a no-op.
    pub async fn delete_by_id(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM chats WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// List the most recent events for a room, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        room_id: RoomId,
        limit: i64,
    ) -> Result<Vec<ChatEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {CHAT_COLUMNS} FROM chats WHERE room_id = $1 ORDER BY id DESC LIMIT $2"
        );
        sqlx::query_as::<_, ChatEvent>(&query)
            .bind(room_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
