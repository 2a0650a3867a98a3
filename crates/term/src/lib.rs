//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and instead renders into a simple framebuffer that is flushed to
//! the terminal with crossterm.
//!
//! - [`view`] is pure: session data in, framebuffer out
//! - [`renderer`] owns the terminal (raw mode, alternate screen, flushing)
//! - board cells are 2 columns wide to keep the grid roughly square

pub mod fb;
pub mod renderer;
pub mod view;

pub use tui_mordicus_core as core;
pub use tui_mordicus_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{changed_rows, encode_full_into, encode_rows_into, TerminalRenderer};
pub use view::{GameView, SessionView, Viewport};
