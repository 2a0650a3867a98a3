//! Core puzzle logic module - pure, deterministic, and testable
//!
//! This module contains the resolution engine: given a grid and a direction,
//! it computes every state transition that one player action causes. It has
//! **zero dependencies** on rendering, input, timing or storage, making it:
//!
//! - **Deterministic**: equal inputs always produce equal scripts
//! - **Testable**: every rule is a pure function over values
//! - **Portable**: runs the same in the terminal game, tests and benchmarks
//!
//! # Module Structure
//!
//! - [`grid`]: rectangular unit matrix, row-major queries, batched move application
//! - [`moves`]: declarative [`Move`] values
//! - [`state`]: [`StateSnapshot`] and the outcome predicates
//! - [`active`]: the player's own move (free move, push, or no-op)
//! - [`passive`]: one cascade round of gorilla and arrow movement
//! - [`resolve`]: cascade iteration into an animation script
//!
//! # Rules
//!
//! - **Free move**: the player steps onto an empty cell or a coin
//! - **Push**: a run of moveables (arrows, bananas, green blocks) slides one cell
//!   if the cell past it is free of push blockers and inside the grid
//! - **Gorillas**: jump onto every adjacent player or banana at once; blue
//!   gorillas become satiated (and stay put), red ones keep hunting
//! - **Arrows**: slide toward where they point while the cell ahead is empty;
//!   arrows converging on one cell turn into a red block
//! - **Outcome**: the player is captured when its cell disappears, and clears
//!   the level when no banana or coin is left and no gorilla is next to it
//!
//! # Example
//!
//! ```
//! use tui_mordicus_core::{resolve_move_chain, Grid, StateSnapshot};
//! use tui_mordicus_types::Direction;
//!
//! let grid = Grid::parse("
//!     @ b . . B
//! ").unwrap();
//! let state = StateSnapshot::new(grid, 5, 0, 100);
//!
//! let first = resolve_move_chain(&state, Direction::Right).unwrap();
//! let last = first.last().unwrap().clone();
//! assert_eq!(last.bonus, 95);
//! assert!(!last.is_success());
//!
//! let second = resolve_move_chain(&last, Direction::Right).unwrap();
//! let end = second.last().unwrap();
//! assert!(end.is_success());
//! assert_eq!(end.grid.to_string(), "..@S.");
//! ```

pub mod active;
pub mod error;
pub mod grid;
pub mod moves;
pub mod passive;
pub mod resolve;
pub mod state;

pub use tui_mordicus_types as types;

// Re-export commonly used types for convenience
pub use active::resolve_active_move;
pub use error::{CoreError, GridError};
pub use grid::Grid;
pub use moves::Move;
pub use passive::resolve_passive_step;
pub use resolve::{resolve_chain, resolve_move_chain};
pub use state::{is_game_over, is_player_dead, is_success, StateSnapshot};
