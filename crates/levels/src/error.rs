//! Errors raised while loading or querying a level pack.

use std::error::Error;
use std::fmt;
use std::io;

use tui_mordicus_core::GridError;

use crate::LevelKind;

#[derive(Debug)]
pub enum LevelError {
    /// The pack file is not valid JSON or does not have the expected shape.
    Json(serde_json::Error),
    /// The pack file could not be read.
    Io(io::Error),
    /// A level grid is empty, ragged or holds an unknown glyph.
    Grid {
        kind: LevelKind,
        index: usize,
        source: GridError,
    },
    /// A level grid has no player.
    MissingPlayer { kind: LevelKind, index: usize },
    /// Stage numbers start at 1.
    InvalidStage(u32),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed level pack: {err}"),
            Self::Io(err) => write!(f, "failed to read level pack: {err}"),
            Self::Grid {
                kind,
                index,
                source,
            } => write!(f, "{kind} level #{}: {source}", index + 1),
            Self::MissingPlayer { kind, index } => {
                write!(f, "{kind} level #{} has no player", index + 1)
            }
            Self::InvalidStage(stage) => write!(
                f,
                "stage number should be greater than zero, requested stage #{stage}"
            ),
        }
    }
}

impl Error for LevelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Grid { source, .. } => Some(source),
            Self::MissingPlayer { .. } | Self::InvalidStage(_) => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<io::Error> for LevelError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
