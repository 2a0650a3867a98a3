//! Level pack for the puzzle.
//!
//! A pack is a JSON document with two lists of grids, the `original`
//! campaign and `custom` levels:
//!
//! ```json
//! { "original": [[["😮", "🟡"], ["⬛", "🟥"]]], "custom": [] }
//! ```
//!
//! Each grid is an array of rows of unit glyphs. Loading assigns every level
//! a 1-based stage number within its list and a six character password
//! derived from the grid itself, so the same pack always yields the same
//! passwords.

use std::fmt;

use tui_mordicus_core::Grid;

pub mod error;
pub mod pack;
pub mod password;

pub use error::LevelError;
pub use pack::LevelPack;

/// Which list of the pack a level comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelKind {
    Original,
    Custom,
}

impl LevelKind {
    pub fn from_custom(is_custom: bool) -> Self {
        if is_custom {
            LevelKind::Custom
        } else {
            LevelKind::Original
        }
    }
}

impl fmt::Display for LevelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LevelKind::Original => "original",
            LevelKind::Custom => "custom",
        })
    }
}

/// One playable level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub grid: Grid,
    pub is_custom: bool,
    /// 1-based position within its list.
    pub stage: u32,
    pub password: String,
}

impl Level {
    pub fn kind(&self) -> LevelKind {
        LevelKind::from_custom(self.is_custom)
    }
}
