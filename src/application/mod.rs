//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers persist changes and report usage; query handlers only read.

pub mod handlers;

pub use handlers::*;
