//! Token validation for the real-time channel and the undo/redo surface.
//!
//! Tokens are issued by the external account service; this core only
//! consumes them.

pub mod jwt;
