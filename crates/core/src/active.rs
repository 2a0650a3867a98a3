//! Active move resolution - what the player's own input does
//!
//! One direction input has exactly one of three outcomes:
//!
//! - **Free move**: the cell ahead is empty or holds a coin; the player steps
//!   onto it (a coin is simply overwritten).
//! - **Push move**: the cell ahead holds a moveable unit; the whole run of
//!   consecutive moveables slides one cell, then the player steps into the
//!   first vacated cell.
//! - **No-op**: anything else (attacker, blocker, grid edge, or a push that is
//!   stopped by a push blocker or the edge). The input state comes back as is.
//!
//! Successful moves cost [`BONUS_DECAY`] bonus points, floored at zero.

use log::debug;

use crate::error::CoreError;
use crate::grid::Grid;
use crate::moves::Move;
use crate::state::StateSnapshot;
use crate::types::{
    Coordinate, Direction, Unit, BONUS_DECAY, MOVEABLES, PUSH_BLOCKERS,
};

/// Resolve one player input.
///
/// Fails with [`CoreError::InvalidGrid`] when the grid has no player.
pub fn resolve_active_move(
    state: &StateSnapshot,
    dir: Direction,
) -> Result<StateSnapshot, CoreError> {
    let player = state
        .grid
        .locate(Unit::Player)
        .ok_or(CoreError::InvalidGrid)?;

    let ahead = state.grid.get(player.forward(dir));
    let next = match ahead {
        Some(Unit::Coin) | Some(Unit::Empty) => Some(free_move(state, player, dir)),
        Some(unit) if MOVEABLES.contains(unit) => push_move(state, player, dir),
        _ => None,
    };

    Ok(next.unwrap_or_else(|| state.clone()))
}

/// Step the player one cell in `dir` on the state's grid.
fn free_move(state: &StateSnapshot, player: Coordinate, dir: Direction) -> StateSnapshot {
    let mv = Move::new(player, player.forward(dir), Unit::Player);
    StateSnapshot {
        grid: state.grid.apply_move(&mv),
        bonus: state.bonus.saturating_sub(BONUS_DECAY),
        ..state.clone()
    }
}

/// Slide the run of moveables ahead of the player, then step into the gap.
///
/// Returns `None` when the run is blocked.
fn push_move(state: &StateSnapshot, player: Coordinate, dir: Direction) -> Option<StateSnapshot> {
    let (chain, stop) = scan_chain(&state.grid, player.forward(dir), dir);

    if chain.is_empty() {
        return None;
    }
    match state.grid.get(stop) {
        Some(unit) if !PUSH_BLOCKERS.contains(unit) => {}
        blocker => {
            debug!(
                "push {} from {player} blocked by {:?} at {stop}",
                dir.as_str(),
                blocker
            );
            return None;
        }
    }

    // Farthest first, so each unit moves into a cell its neighbour already left.
    let moves: Vec<Move> = chain
        .iter()
        .rev()
        .map(|&(pos, unit)| Move::new(pos, pos.forward(dir), unit))
        .collect();

    let pushed = state.with_grid(state.grid.apply_moves(&moves));
    Some(free_move(&pushed, player, dir))
}

/// Collect consecutive moveables from `start` onward, plus the first cell past
/// them (which may be outside the grid).
fn scan_chain(
    grid: &Grid,
    start: Coordinate,
    dir: Direction,
) -> (Vec<(Coordinate, Unit)>, Coordinate) {
    let mut chain = Vec::new();
    let mut pos = start;
    while let Some(unit) = grid.get(pos).filter(|&u| MOVEABLES.contains(u)) {
        chain.push((pos, unit));
        pos = pos.forward(dir);
    }
    (chain, pos)
}
