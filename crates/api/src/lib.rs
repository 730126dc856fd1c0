//! sketchrelay API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! WebSocket registry, and the undo/redo coordinator) so integration tests
//! and the binary entrypoint share the same code paths.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
pub mod sync;
pub mod ws;
