//! TUI Mordicus (workspace facade crate).
//!
//! The engine, level pack, input and terminal layers live in dedicated crates
//! under `crates/` and are re-exported here as
//! `tui_mordicus::{core, levels, input, term, types}`. The session layer
//! that ties them together for the binary lives in this crate.

pub use tui_mordicus_core as core;
pub use tui_mordicus_input as input;
pub use tui_mordicus_levels as levels;
pub use tui_mordicus_term as term;
pub use tui_mordicus_types as types;

pub mod config;
pub mod playback;
pub mod session;

pub use config::GameConfig;
pub use playback::Playback;
pub use session::{Session, SessionError};
