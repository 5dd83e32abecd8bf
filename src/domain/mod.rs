//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `sleep` - Sleep-cycle arithmetic, moods, history and preferences

pub mod foundation;
pub mod sleep;
