//! Error types for the resolution engine.

use std::error::Error;
use std::fmt;

/// Errors raised by the move resolvers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// An active move was requested on a grid without a player.
    ///
    /// This is a broken caller contract: the session layer must never ask a
    /// captured (absent) player to move.
    InvalidGrid,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrid => write!(f, "invalid grid, no player found"),
        }
    }
}

impl Error for CoreError {}

/// Errors from building a [`Grid`](crate::Grid) out of rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or rows without cells.
    Empty,
    /// A row does not have the same length as the first one.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell could not be parsed into a unit.
    UnknownGlyph {
        row: usize,
        col: usize,
        glyph: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid has no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} cells, expected {expected} (grids must be rectangular)"
            ),
            Self::UnknownGlyph { row, col, glyph } => {
                write!(f, "unknown unit '{glyph}' at ({row}, {col})")
            }
        }
    }
}

impl Error for GridError {}
