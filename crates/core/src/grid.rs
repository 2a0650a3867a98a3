//! Grid module - the rectangular matrix of units
//!
//! The grid is stored as a flat row-major array (`row * width + col`) for cache
//! locality, in the same spirit as a fixed game board, but its dimensions are
//! chosen per level. Coordinates are `(row, col)` with rows growing downward.
//!
//! A grid is a value: every move application returns a new grid and leaves
//! the original untouched. Equality is structural, which is what the resolve
//! loop uses to detect that a cascade has settled.
//!
//! Every "find all" query scans in row-major order (top-to-bottom, then
//! left-to-right). Tie-breaks in the cascade depend on that order.

use std::fmt;

use arrayvec::ArrayVec;

use crate::error::GridError;
use crate::moves::Move;
use crate::types::{Coordinate, Direction, Unit, UnitSet};

/// Rectangular matrix of units, fixed size for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major cells (row * width + col)
    cells: Vec<Unit>,
}

impl Grid {
    /// Build a grid from rows of units.
    ///
    /// Fails on an empty grid or when rows differ in length.
    pub fn from_rows(rows: Vec<Vec<Unit>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, units) in rows.into_iter().enumerate() {
            if units.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: units.len(),
                });
            }
            cells.extend(units);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse a grid written with unit mnemonics, one row per line.
    ///
    /// Blank lines and whitespace inside a line are ignored, so grids can be
    /// indented or spaced out in tests.
    ///
    /// ```
    /// use tui_mordicus_core::Grid;
    /// use tui_mordicus_types::{Coordinate, Unit};
    ///
    /// let grid = Grid::parse("
    ///     @ b .
    ///     R . .
    /// ").unwrap();
    /// assert_eq!(grid.width(), 3);
    /// assert_eq!(grid.get(Coordinate::new(1, 0)), Some(Unit::RedGorilla));
    /// ```
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for line in text.lines() {
            let mut units = Vec::new();
            for (col, ch) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
                let unit = Unit::from_mnemonic(ch).ok_or_else(|| GridError::UnknownGlyph {
                    row: rows.len(),
                    col,
                    glyph: ch.to_string(),
                })?;
                units.push(unit);
            }
            if !units.is_empty() {
                rows.push(units);
            }
        }
        Self::from_rows(rows)
    }

    /// A grid of the given size with every cell set to `unit`.
    ///
    /// Zero dimensions are bumped to 1.
    pub fn filled(width: usize, height: usize, unit: Unit) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![unit; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Calculate flat index from a coordinate, `None` when outside the grid.
    #[inline(always)]
    fn index(&self, pos: Coordinate) -> Option<usize> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        let (row, col) = (pos.row as usize, pos.col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    #[inline(always)]
    fn coordinate(&self, index: usize) -> Coordinate {
        Coordinate::new((index / self.width) as i32, (index % self.width) as i32)
    }

    /// Unit at `pos`; `None` means out of bounds (distinct from `Unit::Empty`).
    pub fn get(&self, pos: Coordinate) -> Option<Unit> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    pub fn contains(&self, pos: Coordinate) -> bool {
        self.index(pos).is_some()
    }

    /// Set the unit at `pos`. Returns false if out of bounds.
    pub(crate) fn set(&mut self, pos: Coordinate, unit: Unit) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = unit;
                true
            }
            None => false,
        }
    }

    /// First cell holding `unit`, row-major.
    pub fn locate(&self, unit: Unit) -> Option<Coordinate> {
        self.cells
            .iter()
            .position(|&u| u == unit)
            .map(|idx| self.coordinate(idx))
    }

    /// Every cell holding one of `units`, row-major.
    pub fn locate_all(&self, units: impl Into<UnitSet>) -> Vec<Coordinate> {
        let units = units.into();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &u)| units.contains(u))
            .map(|(idx, _)| self.coordinate(idx))
            .collect()
    }

    /// Number of cells holding one of `units`.
    pub fn count(&self, units: impl Into<UnitSet>) -> usize {
        let units = units.into();
        self.cells.iter().filter(|&&u| units.contains(u)).count()
    }

    /// In-bounds orthogonal neighbours, in Up, Right, Down, Left order.
    pub fn neighbors4(&self, pos: Coordinate) -> ArrayVec<Coordinate, 4> {
        Direction::ALL
            .iter()
            .map(|&dir| pos.forward(dir))
            .filter(|&next| self.contains(next))
            .collect()
    }

    /// Apply a single move.
    ///
    /// A move whose only destination is its own source is a no-op.
    pub fn apply_move(&self, mv: &Move) -> Grid {
        self.apply_moves(std::slice::from_ref(mv))
    }

    /// Apply a batch of moves that were all computed against `self`.
    ///
    /// Moves are applied in list order. For each move every destination is
    /// written with the resulting unit, then the source is cleared (unless the
    /// source is itself a destination). Two moves sharing a destination
    /// therefore resolve as last-write-wins, and a chain of moves ordered
    /// farthest-first slides without losing anything.
    pub fn apply_moves(&self, moves: &[Move]) -> Grid {
        let mut next = self.clone();
        for mv in moves {
            for &dest in &mv.destinations {
                let written = next.set(dest, mv.resulting_unit);
                debug_assert!(written, "move destination {dest} is outside the grid");
            }
            if !mv.destinations.contains(&mv.source) {
                next.set(mv.source, Unit::Empty);
            }
        }
        next
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Unit]> {
        self.cells.chunks(self.width)
    }

    /// Copy into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Unit>> {
        self.rows().map(<[Unit]>::to_vec).collect()
    }

    /// Get a reference to the internal row-major cells.
    pub fn cells(&self) -> &[Unit] {
        &self.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for unit in row {
                write!(f, "{}", unit.mnemonic())?;
            }
        }
        Ok(())
    }
}
