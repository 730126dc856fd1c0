//! Handlers for the out-of-band undo/redo surface.
//!
//! Both endpoints require authentication, acquire the room's exclusive
//! lock via the coordinator, and broadcast their result to the room's live
//! subscribers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use sketchrelay_core::types::RoomId;
use sketchrelay_db::models::chat::ChatEvent;

use crate::error::AppResult;
use crate::handlers::validate_room_id;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response body for a successful undo or redo.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub message: &'static str,
    pub action: ChatEvent,
}

/// POST /api/v1/undo/{room_id}
///
/// Removes the most recent event for the room and reports it.
pub async fn undo(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
) -> AppResult<impl IntoResponse> {
    validate_room_id(room_id)?;

    let action = state.sync.undo(&state.pool, &state.registry, room_id).await?;
    Ok(Json(SyncResponse {
        message: "Undo successful",
        action,
    }))
}

/// POST /api/v1/redo/{room_id}
///
/// Re-appends the most recently undone event under a fresh id and reports it.
pub async fn redo(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
) -> AppResult<impl IntoResponse> {
    validate_room_id(room_id)?;

    let action = state.sync.redo(&state.pool, &state.registry, room_id).await?;
    Ok(Json(SyncResponse {
        message: "Redo successful",
        action,
    }))
}
