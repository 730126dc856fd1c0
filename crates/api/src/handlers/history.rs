//! Room history replay for late joiners.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use sketchrelay_core::types::RoomId;
use sketchrelay_db::models::chat::ChatEvent;
use sketchrelay_db::repositories::ChatRepo;

use crate::error::AppResult;
use crate::handlers::validate_room_id;
use crate::state::AppState;

/// Default and maximum history page size — what clients replay on join.
const MAX_HISTORY_LIMIT: i64 = 1000;

/// Query parameters for history listing.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    /// Maximum number of events to return (default and cap: 1000).
    pub limit: Option<i64>,
}

/// Response body: events newest-first, under the field name deployed
/// clients read.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<ChatEvent>,
}

/// GET /api/v1/rooms/{room_id}/events
///
/// Returns the most recent events for the room, newest first. An empty or
/// unknown room yields an empty list, not an error.
pub async fn list_events(
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
    Query(params): Query<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    validate_room_id(room_id)?;

    let limit = params.limit.unwrap_or(MAX_HISTORY_LIMIT).clamp(1, MAX_HISTORY_LIMIT);
    let messages = ChatRepo::list_recent(&state.pool, room_id, limit).await?;
    Ok(Json(HistoryResponse { messages }))
}
