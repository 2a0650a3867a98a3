//! Game state snapshots and the outcome predicates.

use crate::grid::Grid;
use crate::types::{Unit, UnitSet, ATTACKERS, INITIAL_BONUS, INITIAL_LIVES, INITIAL_SCORE};

/// Immutable game state at one instant.
///
/// Snapshots are never mutated by the resolvers; every transition returns a
/// new snapshot. Session-only data (stage, password, screen...) is kept by the
/// session layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateSnapshot {
    pub grid: Grid,
    pub lives: u32,
    pub score: u32,
    pub bonus: u32,
}

impl StateSnapshot {
    pub fn new(grid: Grid, lives: u32, score: u32, bonus: u32) -> Self {
        Self {
            grid,
            lives,
            score,
            bonus,
        }
    }

    /// A fresh game on `grid` with the starting counters.
    pub fn initial(grid: Grid) -> Self {
        Self::new(grid, INITIAL_LIVES, INITIAL_SCORE, INITIAL_BONUS)
    }

    /// Same counters, different grid.
    pub fn with_grid(&self, grid: Grid) -> Self {
        Self {
            grid,
            ..self.clone()
        }
    }

    /// The player has been captured (no player cell left).
    pub fn is_player_dead(&self) -> bool {
        self.grid.locate(Unit::Player).is_none()
    }

    /// The level is cleared: the player is alive, no attacker stands next to
    /// it, and no banana or coin remains.
    pub fn is_success(&self) -> bool {
        let Some(player) = self.grid.locate(Unit::Player) else {
            return false;
        };

        let threatened = self
            .grid
            .neighbors4(player)
            .iter()
            .filter_map(|&pos| self.grid.get(pos))
            .any(|unit| ATTACKERS.contains(unit));

        !threatened && self.grid.count(UnitSet::of(&[Unit::Banana, Unit::Coin])) == 0
    }

    /// No lives left. Independent of the grid.
    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }
}

pub fn is_player_dead(state: &StateSnapshot) -> bool {
    state.is_player_dead()
}

pub fn is_success(state: &StateSnapshot) -> bool {
    state.is_success()
}

pub fn is_game_over(state: &StateSnapshot) -> bool {
    state.is_game_over()
}
