pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                       GET   WebSocket upgrade (token query param)
/// /rooms/{room_id}/events   GET   history replay, newest first
/// /undo/{room_id}           POST  remove the latest event (auth required)
/// /redo/{room_id}           POST  re-apply the latest undone event (auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route(
            "/rooms/{room_id}/events",
            get(handlers::history::list_events),
        )
        .route("/undo/{room_id}", post(handlers::sync::undo))
        .route("/redo/{room_id}", post(handlers::sync::redo))
}
