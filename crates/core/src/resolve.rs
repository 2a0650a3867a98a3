//! Resolve loop - turns one player action into an animation script
//!
//! After the player's move, cascade steps are repeated until the grid stops
//! changing or a terminal outcome is reached. Every intermediate snapshot is
//! kept, in order, so a renderer can play them back one frame at a time.
//!
//! A capture costs exactly one life: the final snapshot of a script that ends
//! with the player gone carries `lives - 1`.

use log::debug;

use crate::active::resolve_active_move;
use crate::error::CoreError;
use crate::passive::resolve_passive_step;
use crate::state::StateSnapshot;
use crate::types::Direction;

/// Run cascade steps from `state` until it settles, is cleared, or the
/// player is captured.
///
/// The input state itself is not part of the result. An already-cleared
/// state yields an empty script, as does one where nothing moves.
pub fn resolve_chain(state: &StateSnapshot) -> Vec<StateSnapshot> {
    let mut script = Vec::new();
    if state.is_success() {
        return script;
    }

    let mut current = state.clone();
    loop {
        let next = resolve_passive_step(&current);
        if next.grid == current.grid {
            debug!("cascade settled after {} steps", script.len());
            break;
        }

        if next.is_player_dead() {
            debug!("player captured after {} steps", script.len() + 1);
            // Callers only resolve moves while a life is left; `u32` clamps
            // at zero rather than going negative.
            debug_assert!(next.lives > 0, "capture with no lives left");
            let lives = next.lives.saturating_sub(1);
            script.push(StateSnapshot { lives, ..next });
            break;
        }

        let cleared = next.is_success();
        script.push(next.clone());
        if cleared {
            debug!("level cleared after {} steps", script.len());
            break;
        }
        current = next;
    }

    script
}

/// The full script for one player input: the active move result followed by
/// its cascade.
///
/// Fails with [`CoreError::InvalidGrid`] when the grid has no player.
pub fn resolve_move_chain(
    state: &StateSnapshot,
    dir: Direction,
) -> Result<Vec<StateSnapshot>, CoreError> {
    let moved = resolve_active_move(state, dir)?;
    let cascade = resolve_chain(&moved);

    let mut script = Vec::with_capacity(cascade.len() + 1);
    script.push(moved);
    script.extend(cascade);
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn state(text: &str) -> StateSnapshot {
        StateSnapshot::new(Grid::parse(text).unwrap(), 3, 0, 100)
    }

    #[test]
    fn test_cleared_state_has_nothing_to_animate() {
        assert!(resolve_chain(&state(". @ .")).is_empty());
    }

    #[test]
    fn test_stable_grid_has_nothing_to_animate() {
        assert!(resolve_chain(&state("@ . o\n# > #")).is_empty());
    }

    #[test]
    fn test_capture_costs_one_life() {
        let script = resolve_chain(&state("@ R o"));
        assert_eq!(script.len(), 1);
        assert!(script[0].is_player_dead());
        assert_eq!(script[0].lives, 2);
        assert_eq!(script[0].grid, Grid::parse("R . o").unwrap());
    }

    #[test]
    fn test_arrow_slides_until_blocked() {
        let script = resolve_chain(&state("@ o\n> .\n. ."));
        assert_eq!(script.len(), 1);
        assert_eq!(script[0].grid, Grid::parse("@ o\n. >\n. .").unwrap());
        assert_eq!(script[0].lives, 3);
    }

    #[test]
    fn test_move_chain_starts_with_active_result() {
        let s = state("@ . o");
        let script = resolve_move_chain(&s, Direction::Right).unwrap();
        assert_eq!(script.len(), 1);
        assert_eq!(script[0].grid, Grid::parse(". @ o").unwrap());
        assert_eq!(script[0].bonus, 95);
    }
}
