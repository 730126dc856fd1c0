//! Server-side undo/redo over persisted room history.
//!
//! The coordinator mutates the same event store the live traffic appends
//! to, so its results are pushed through the registry's room fan-out — an
//! undo or redo is never invisible to connected peers.

pub mod coordinator;
pub mod locks;

pub use coordinator::SyncCoordinator;
pub use locks::RoomLocks;
