use std::collections::{HashMap, HashSet};

use axum::body::Bytes;
use axum::extract::ws::Message;
use sketchrelay_core::types::{DbId, RoomId, Timestamp};
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// One authenticated real-time session.
pub struct WsConnection {
    /// Authenticated user ID from the verified token.
    pub user_id: DbId,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
    /// Rooms this connection is currently joined to.
    pub rooms: HashSet<RoomId>,
}

/// Registry state: the connection map plus a room index so fan-out touches
/// only a room's subscribers instead of every connection.
///
/// Both maps live under one lock. Membership changes and deregistration are
/// therefore atomic: once `remove` returns, no broadcast can reach the
/// connection.
#[derive(Default)]
struct Registry {
    connections: HashMap<String, WsConnection>,
    rooms: HashMap<RoomId, HashSet<String>>,
}

/// Tracks all live authenticated connections and their room memberships.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    registry: RwLock<Registry>,
}

impl WsManager {
    /// Create a new, empty connection registry.
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
        }
    }

    /// Register a new authenticated connection with an empty room set.
    ///
    /// Returns the generated connection id and the receiver half of the
    /// message channel so the caller can forward messages to the socket sink.
    pub async fn add(&self, user_id: DbId) -> (String, mpsc::UnboundedReceiver<Message>) {
        let conn_id = uuid::Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
            rooms: HashSet::new(),
        };
        self.registry
            .write()
            .await
            .connections
            .insert(conn_id.clone(), conn);
        (conn_id, rx)
    }

    /// Deregister a connection and drop it from every room's subscriber set.
    ///
    /// Must be invoked on transport close or error. Removing an unknown id
    /// is a no-op.
    pub async fn remove(&self, conn_id: &str) {
        let mut guard = self.registry.write().await;
        let reg = &mut *guard;
        if let Some(conn) = reg.connections.remove(conn_id) {
            for room_id in conn.rooms {
                if let Some(subs) = reg.rooms.get_mut(&room_id) {
                    subs.remove(conn_id);
                    if subs.is_empty() {
                        reg.rooms.remove(&room_id);
                    }
                }
            }
        }
    }

    /// Add exactly `room_id` to the connection's membership set.
    ///
    /// Unknown connection ids are ignored (the connection raced a close).
    pub async fn join_room(&self, conn_id: &str, room_id: RoomId) {
        let mut guard = self.registry.write().await;
        let reg = &mut *guard;
        if let Some(conn) = reg.connections.get_mut(conn_id) {
            conn.rooms.insert(room_id);
            reg.rooms
                .entry(room_id)
                .or_default()
                .insert(conn_id.to_string());
        }
    }

    /// Remove exactly `room_id` from the connection's membership set,
    /// leaving all other memberships untouched.
    pub async fn leave_room(&self, conn_id: &str, room_id: RoomId) {
        let mut guard = self.registry.write().await;
        let reg = &mut *guard;
        if let Some(conn) = reg.connections.get_mut(conn_id) {
            conn.rooms.remove(&room_id);
        }
        if let Some(subs) = reg.rooms.get_mut(&room_id) {
            subs.remove(conn_id);
            if subs.is_empty() {
                reg.rooms.remove(&room_id);
            }
        }
    }

    /// Send a frame to every connection currently joined to `room_id`.
    ///
    /// Delivery is independent per peer: a connection whose send channel is
    /// closed is skipped and logged, never failing the caller or delaying
    /// other peers. Returns the number of subscribers the frame was queued
    /// for.
    pub async fn broadcast_to_room(&self, room_id: RoomId, message: Message) -> usize {
        let reg = self.registry.read().await;
        let Some(subs) = reg.rooms.get(&room_id) else {
            return 0;
        };

        let mut delivered = 0;
        for conn_id in subs {
            if let Some(conn) = reg.connections.get(conn_id) {
                if conn.sender.send(message.clone()).is_err() {
                    tracing::debug!(conn_id = %conn_id, room_id, "Dropping frame for closed connection");
                } else {
                    delivered += 1;
                }
            }
        }
        delivered
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.registry.read().await.connections.len()
    }

    /// Number of connections currently subscribed to a room.
    pub async fn room_subscriber_count(&self, room_id: RoomId) -> usize {
        self.registry
            .read()
            .await
            .rooms
            .get(&room_id)
            .map_or(0, HashSet::len)
    }

    /// The rooms a connection is currently joined to, in no particular order.
    pub async fn rooms_of(&self, conn_id: &str) -> Vec<RoomId> {
        self.registry
            .read()
            .await
            .connections
            .get(conn_id)
            .map(|c| c.rooms.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let reg = self.registry.read().await;
        for conn in reg.connections.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }

    /// Send a Close frame to every connection, then clear the registry.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut reg = self.registry.write().await;
        let count = reg.connections.len();
        for conn in reg.connections.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        reg.connections.clear();
        reg.rooms.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
