//! Shared types and the domain error taxonomy for the sketchrelay workspace.

pub mod error;
pub mod types;
