//! Terminal input module (session-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`map::Command`] values and provides a held-key repeat handler
//! suitable for terminal environments (including terminals without
//! key-release events).

pub mod handler;
pub mod map;

pub use tui_mordicus_types as types;

pub use handler::RepeatHandler;
pub use map::{direction_of, map_key, should_quit, Command};
