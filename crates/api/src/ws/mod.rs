//! WebSocket infrastructure for real-time drawing synchronization.
//!
//! Provides the connection registry with room-membership tracking, the wire
//! frames, the persist-then-broadcast pipeline, heartbeat monitoring, and
//! the HTTP upgrade handler used by Axum routes.

mod handler;
mod heartbeat;
pub mod manager;
pub mod protocol;

pub use handler::{route_chat, ws_handler};
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
