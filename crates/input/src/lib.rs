//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the closed [`crate::types::Command`] set.
//! The engine never sees keys; this crate is the only place that knows about them.

pub mod map;

pub use blockfall_types as types;

pub use map::{command_for_key, should_quit};
