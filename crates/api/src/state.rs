use std::sync::Arc;

use crate::config::ServerConfig;
use crate::sync::SyncCoordinator;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sketchrelay_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Live connection registry and room fan-out.
    pub registry: Arc<WsManager>,
    /// Per-room undo/redo coordinator; also owns the per-room locks the
    /// chat append path takes.
    pub sync: Arc<SyncCoordinator>,
}
