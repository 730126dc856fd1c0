//! JSON frames exchanged over the real-time channel.

use serde::{Deserialize, Serialize};
use sketchrelay_core::types::{DbId, RoomId};
use sketchrelay_db::models::chat::ChatEvent;

/// Inbound control and drawing frames, discriminated by the `type` field.
///
/// Field names are part of the deployed protocol: `join_room` and `chat`
/// carry the room under `roomId`, while `leave_room` carries it under
/// `room`. Renaming the latter would silently break existing clients, so
/// the asymmetry is kept deliberately.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    JoinRoom {
        #[serde(rename = "roomId")]
        room_id: RoomId,
    },
    LeaveRoom {
        room: RoomId,
    },
    Chat {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        /// Opaque drawing payload, relayed verbatim.
        message: String,
    },
}

/// Outbound frames fanned out to room subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    Chat {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        message: String,
    },
    /// A persisted event was removed by undo; `id` names the removed event.
    Undo {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        id: DbId,
        message: String,
    },
    /// An undone event was re-applied under a fresh id.
    Redo {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        id: DbId,
        message: String,
    },
}

impl ServerFrame {
    /// The frame broadcast after a successful append.
    pub fn chat(event: &ChatEvent) -> Self {
        ServerFrame::Chat {
            room_id: event.room_id,
            message: event.message.clone(),
        }
    }

    /// The frame broadcast after an undo removed `event`.
    pub fn undo(event: &ChatEvent) -> Self {
        ServerFrame::Undo {
            room_id: event.room_id,
            id: event.id,
            message: event.message.clone(),
        }
    }

    /// The frame broadcast after a redo re-created `event`.
    pub fn redo(event: &ChatEvent) -> Self {
        ServerFrame::Redo {
            room_id: event.room_id,
            id: event.id,
            message: event.message.clone(),
        }
    }

    /// Serialize into a WebSocket text message.
    pub fn to_message(&self) -> axum::extract::ws::Message {
        // Serialization of plain strings and integers cannot fail.
        let text = serde_json::to_string(self).unwrap_or_default();
        axum::extract::ws::Message::Text(text.into())
    }
}
