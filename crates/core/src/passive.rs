//! Passive cascade step - one round of gorilla and arrow movement
//!
//! All moves of a step are computed against the same pre-step grid and then
//! applied as one batch, in this fixed priority order:
//!
//! 1. Blue gorillas (row-major). Each jumps onto every adjacent player or
//!    banana at once and lands satiated.
//! 2. Red gorillas (row-major). Same rule, but they stay red and hungry.
//! 3. Free arrows, grouped by orientation (Up, Right, Down, Left) and
//!    row-major within a group. An arrow whose next cell is empty slides into
//!    it. Arrows converging on the same empty cell all land as a red block.
//!
//! Batch application is last-write-wins on shared destinations, so the group
//! order above decides cross-species collisions.

use log::trace;

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::moves::Move;
use crate::state::StateSnapshot;
use crate::types::{Coordinate, Direction, Unit};

/// Compute and apply one cascade round.
///
/// The player never moves here. A grid with nothing left to move comes back
/// structurally equal.
pub fn resolve_passive_step(state: &StateSnapshot) -> StateSnapshot {
    let grid = &state.grid;

    let mut moves = gorilla_moves(grid, Unit::BlueGorilla, Unit::SatiatedBlueGorilla);
    moves.extend(gorilla_moves(grid, Unit::RedGorilla, Unit::RedGorilla));
    moves.extend(free_arrow_moves(grid));

    trace!("cascade step: {} moves", moves.len());
    state.with_grid(grid.apply_moves(&moves))
}

/// Moves of every `gorilla` that has a player or banana next to it.
fn gorilla_moves(grid: &Grid, gorilla: Unit, lands_as: Unit) -> Vec<Move> {
    grid.locate_all(gorilla)
        .into_iter()
        .filter_map(|pos| {
            let prey: ArrayVec<Coordinate, 4> = grid
                .neighbors4(pos)
                .into_iter()
                .filter(|&n| matches!(grid.get(n), Some(Unit::Player) | Some(Unit::Banana)))
                .collect();
            Move::fan_out(pos, prey, lands_as)
        })
        .collect()
}

/// Slides of every arrow facing an empty cell, with converging arrows turned
/// into red blocks.
fn free_arrow_moves(grid: &Grid) -> Vec<Move> {
    let proposals: Vec<Move> = Direction::ALL
        .iter()
        .flat_map(|&dir| {
            let arrow = dir.arrow();
            grid.locate_all(arrow)
                .into_iter()
                .filter(move |pos| grid.get(pos.forward(dir)) == Some(Unit::Empty))
                .map(move |pos| Move::new(pos, pos.forward(dir), arrow))
        })
        .collect();

    proposals
        .iter()
        .map(|mv| {
            let contested = proposals
                .iter()
                .filter(|other| other.source != mv.source)
                .any(|other| mv.destinations.iter().any(|&dest| other.targets(dest)));
            if contested {
                mv.clone().landing_as(Unit::RedBlock)
            } else {
                mv.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        Grid::parse(text).unwrap()
    }

    #[test]
    fn test_gorilla_moves_only_with_prey() {
        let g = grid(
            "
            R . b
            . . R
            @ . .",
        );
        let moves = gorilla_moves(&g, Unit::RedGorilla, Unit::RedGorilla);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].source, Coordinate::new(1, 2));
        assert_eq!(moves[0].destinations.as_slice(), &[Coordinate::new(0, 2)]);
    }

    #[test]
    fn test_gorilla_destinations_follow_direction_order() {
        let g = grid(
            "
            . b .
            b B @
            . b .",
        );
        let moves = gorilla_moves(&g, Unit::BlueGorilla, Unit::SatiatedBlueGorilla);
        assert_eq!(moves.len(), 1);
        assert_eq!(
            moves[0].destinations.as_slice(),
            &[
                Coordinate::new(0, 1),
                Coordinate::new(1, 2),
                Coordinate::new(2, 1),
                Coordinate::new(1, 0),
            ]
        );
        assert_eq!(moves[0].resulting_unit, Unit::SatiatedBlueGorilla);
    }

    #[test]
    fn test_arrow_proposals_grouped_by_orientation() {
        let g = grid(
            "
            > . v
            . . .
            ^ . <",
        );
        let moves = free_arrow_moves(&g);
        let sources: Vec<Coordinate> = moves.iter().map(|m| m.source).collect();
        assert_eq!(
            sources,
            vec![
                Coordinate::new(2, 0),
                Coordinate::new(0, 0),
                Coordinate::new(0, 2),
                Coordinate::new(2, 2),
            ]
        );
        assert!(moves.iter().all(|m| m.resulting_unit.arrow_direction().is_some()));
    }

    #[test]
    fn test_blocked_arrow_does_not_move() {
        let g = grid("> b .\n. . .");
        assert!(free_arrow_moves(&g).is_empty());
    }

    #[test]
    fn test_converging_arrows_marked_red() {
        let g = grid("> . <");
        let moves = free_arrow_moves(&g);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.resulting_unit == Unit::RedBlock));
    }
}
