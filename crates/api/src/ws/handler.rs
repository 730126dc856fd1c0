use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use sketchrelay_core::types::{DbId, RoomId};
use sketchrelay_db::repositories::ChatRepo;

use crate::auth::jwt::validate_token;
use crate::state::AppState;
use crate::ws::protocol::{ClientFrame, ServerFrame};

/// Connection parameters supplied with the upgrade request.
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    /// Bearer token issued by the external account service.
    token: Option<String>,
}

/// HTTP handler that authenticates and upgrades the connection to WebSocket.
///
/// The token arrives as a `?token=` query parameter and is validated before
/// the upgrade. Every failure mode (missing token, malformed, expired, bad
/// signature, missing claim) is refused with the same bare 401 so the cause
/// is never disclosed.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(state): State<AppState>,
) -> Response {
    let token = params.token.unwrap_or_default();
    let claims = match validate_token(&token, &state.config.jwt) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "WebSocket auth failed");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, state, claims.user_id))
        .into_response()
}

/// Manage a single authenticated WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the registry channel.
///   3. Processes inbound frames on the current task.
///   4. Deregisters on disconnect, before the sender task is stopped.
async fn handle_socket(socket: WebSocket, state: AppState, user_id: DbId) {
    let (conn_id, mut rx) = state.registry.add(user_id).await;
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket connected");

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink. A slow or
    // dead peer only ever stalls its own task.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: frames for this connection are handled sequentially
    // here. Persistence awaits suspend only this task, never other
    // connections.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_frame(&state, &conn_id, user_id, text.as_str()).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Deregister first so no further broadcast can target this connection,
    // then stop the sender task.
    state.registry.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket disconnected");
}

/// Dispatch one inbound frame.
async fn handle_frame(state: &AppState, conn_id: &str, user_id: DbId, text: &str) {
    let frame: ClientFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => {
            // Malformed frames are dropped; the operation is never attempted.
            tracing::debug!(conn_id = %conn_id, error = %e, "Ignoring malformed frame");
            return;
        }
    };

    match frame {
        ClientFrame::JoinRoom { room_id } => {
            state.registry.join_room(conn_id, room_id).await;
            tracing::debug!(conn_id = %conn_id, room_id, "Joined room");
        }
        ClientFrame::LeaveRoom { room } => {
            state.registry.leave_room(conn_id, room).await;
            tracing::debug!(conn_id = %conn_id, room_id = room, "Left room");
        }
        ClientFrame::Chat { room_id, message } => {
            route_chat(state, user_id, room_id, &message).await;
        }
    }
}

/// Persist a drawing event, then fan it out to the room's subscribers.
///
/// The broadcast happens strictly after the append acknowledgment, so no
/// peer ever observes an event a later history fetch would miss. The sender
/// receives its own frame back (intentional echo, it simplifies client-side
/// reconciliation). An append failure is logged and nothing is broadcast.
pub async fn route_chat(state: &AppState, user_id: DbId, room_id: RoomId, message: &str) {
    // Shares the coordinator's per-room lock so appends serialize against
    // undo/redo for the same room. Other rooms are unaffected.
    let _room = state.sync.lock_room(room_id).await;

    let event = match ChatRepo::append(&state.pool, room_id, user_id, message).await {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(room_id, user_id, error = %e, "Failed to persist drawing event");
            return;
        }
    };

    let delivered = state
        .registry
        .broadcast_to_room(room_id, ServerFrame::chat(&event).to_message())
        .await;
    tracing::debug!(room_id, event_id = event.id, delivered, "Drawing event broadcast");
}
