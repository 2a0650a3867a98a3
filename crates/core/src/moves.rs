//! Declarative moves.
//!
//! A [`Move`] describes a transition; it does nothing until a grid applies it
//! (see [`Grid::apply_moves`](crate::Grid::apply_moves)).

use arrayvec::ArrayVec;

use crate::types::{Coordinate, Unit};

/// One unit leaving `source` and appearing at every destination.
///
/// Only gorillas have more than one destination: they duplicate onto every
/// adjacent player or banana at once, so four (the orthogonal neighbours) is
/// the upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub source: Coordinate,
    pub destinations: ArrayVec<Coordinate, 4>,
    /// Unit written into each destination.
    pub resulting_unit: Unit,
}

impl Move {
    /// Single-destination move.
    pub fn new(source: Coordinate, destination: Coordinate, resulting_unit: Unit) -> Self {
        let mut destinations = ArrayVec::new();
        destinations.push(destination);
        Self {
            source,
            destinations,
            resulting_unit,
        }
    }

    /// Move onto several destinations at once.
    ///
    /// Returns `None` when `destinations` is empty: a move always lands
    /// somewhere.
    pub fn fan_out(
        source: Coordinate,
        destinations: ArrayVec<Coordinate, 4>,
        resulting_unit: Unit,
    ) -> Option<Self> {
        if destinations.is_empty() {
            return None;
        }
        Some(Self {
            source,
            destinations,
            resulting_unit,
        })
    }

    /// Same move, landing as a different unit.
    pub fn landing_as(mut self, unit: Unit) -> Self {
        self.resulting_unit = unit;
        self
    }

    /// Whether any destination equals `pos`.
    pub fn targets(&self, pos: Coordinate) -> bool {
        self.destinations.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_out_requires_a_destination() {
        let origin = Coordinate::new(1, 1);
        assert!(Move::fan_out(origin, ArrayVec::new(), Unit::RedGorilla).is_none());

        let mut dests = ArrayVec::new();
        dests.push(Coordinate::new(0, 1));
        dests.push(Coordinate::new(1, 2));
        let mv = Move::fan_out(origin, dests, Unit::RedGorilla).unwrap();
        assert!(mv.targets(Coordinate::new(1, 2)));
        assert!(!mv.targets(origin));
    }

    #[test]
    fn landing_as_keeps_geometry() {
        let mv = Move::new(Coordinate::new(0, 0), Coordinate::new(0, 1), Unit::ArrowRight)
            .landing_as(Unit::RedBlock);
        assert_eq!(mv.resulting_unit, Unit::RedBlock);
        assert_eq!(mv.source, Coordinate::new(0, 0));
        assert_eq!(mv.destinations.as_slice(), &[Coordinate::new(0, 1)]);
    }
}
