//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, level loading, terminal rendering).
//!
//! # Units
//!
//! Every grid cell holds exactly one [`Unit`]. Each unit has two textual forms:
//!
//! | Unit | Glyph | Mnemonic |
//! |------|-------|----------|
//! | `Empty` | ⬛ | `.` |
//! | `Player` | 😮 | `@` |
//! | `Coin` | 🟡 | `o` |
//! | `Banana` | 🍌 | `b` |
//! | `RedGorilla` | 🦍 | `R` |
//! | `BlueGorilla` | 🐵 | `B` |
//! | `SatiatedBlueGorilla` | 🙈 | `S` |
//! | `GreenBlock` | 🟩 | `g` |
//! | `RedBlock` | 🟥 | `#` |
//! | `ArrowUp` | ⬆️ | `^` |
//! | `ArrowRight` | ➡️ | `>` |
//! | `ArrowDown` | ⬇️ | `v` |
//! | `ArrowLeft` | ⬅️ | `<` |
//!
//! Glyphs are what level packs store; mnemonics are what tests, logs and the
//! terminal view use.
//!
//! # Classification Sets
//!
//! - [`ATTACKERS`]: capture the player by orthogonal adjacency
//! - [`MOVE_BLOCKERS`]: cannot be entered by any move
//! - [`PUSH_BLOCKERS`]: stop a push chain
//! - [`MOVEABLES`]: can be pushed by the player
//!
//! Sets are `u16` bitsets, so membership is a single mask test.
//!
//! # Coordinates
//!
//! `(row, col)`, 0-indexed, rows grow downward and columns grow rightward.
//!
//! # Examples
//!
//! ```
//! use tui_mordicus_types::{Coordinate, Direction, Unit, MOVEABLES, PUSH_BLOCKERS};
//!
//! let unit = Unit::from_mnemonic('b').unwrap();
//! assert_eq!(unit, Unit::Banana);
//! assert!(MOVEABLES.contains(unit));
//! assert!(PUSH_BLOCKERS.contains(Unit::Coin));
//!
//! let pos = Coordinate::new(2, 3).forward(Direction::Up);
//! assert_eq!(pos, Coordinate::new(1, 3));
//!
//! assert_eq!(Direction::Left.arrow(), Unit::ArrowLeft);
//! assert_eq!(Unit::ArrowDown.arrow_direction(), Some(Direction::Down));
//! ```

use std::fmt;

/// Bonus lost by every successful player move (free move or push).
pub const BONUS_DECAY: u32 = 5;

/// Lives at the start of a new game.
pub const INITIAL_LIVES: u32 = 5;

/// Score at the start of a new game.
pub const INITIAL_SCORE: u32 = 0;

/// Bonus at the start of every level attempt.
pub const INITIAL_BONUS: u32 = 1000;

/// Number of characters in a level password.
pub const PASSWORD_LEN: usize = 6;

/// Default delay before the player's own move is shown (ms).
pub const DEFAULT_MOVE_DELAY_MS: u32 = 150;

/// Default delay between two cascade frames (ms).
pub const DEFAULT_CASCADE_DELAY_MS: u32 = 200;

/// Key release emulation timeout for terminals without release events (ms).
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Every kind of grid cell.
///
/// Exactly one unit per cell, no payload beyond the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Unit {
    Empty,
    Player,
    Coin,
    Banana,
    RedGorilla,
    BlueGorilla,
    SatiatedBlueGorilla,
    GreenBlock,
    RedBlock,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    ArrowLeft,
}

impl Unit {
    /// All units, in declaration order.
    pub const ALL: [Unit; 13] = [
        Unit::Empty,
        Unit::Player,
        Unit::Coin,
        Unit::Banana,
        Unit::RedGorilla,
        Unit::BlueGorilla,
        Unit::SatiatedBlueGorilla,
        Unit::GreenBlock,
        Unit::RedBlock,
        Unit::ArrowUp,
        Unit::ArrowRight,
        Unit::ArrowDown,
        Unit::ArrowLeft,
    ];

    /// Level pack glyph (emoji, including the variation selector on arrows).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_mordicus_types::Unit;
    ///
    /// assert_eq!(Unit::Player.glyph(), "\u{1F62E}");
    /// assert_eq!(Unit::ArrowUp.glyph(), "\u{2B06}\u{FE0F}");
    /// ```
    pub fn glyph(&self) -> &'static str {
        match self {
            Unit::Empty => "\u{2B1B}",
            Unit::Player => "\u{1F62E}",
            Unit::Coin => "\u{1F7E1}",
            Unit::Banana => "\u{1F34C}",
            Unit::RedGorilla => "\u{1F98D}",
            Unit::BlueGorilla => "\u{1F435}",
            Unit::SatiatedBlueGorilla => "\u{1F648}",
            Unit::GreenBlock => "\u{1F7E9}",
            Unit::RedBlock => "\u{1F7E5}",
            Unit::ArrowUp => "\u{2B06}\u{FE0F}",
            Unit::ArrowRight => "\u{27A1}\u{FE0F}",
            Unit::ArrowDown => "\u{2B07}\u{FE0F}",
            Unit::ArrowLeft => "\u{2B05}\u{FE0F}",
        }
    }

    /// Parse a level pack glyph.
    ///
    /// Arrow glyphs are accepted with or without the trailing variation selector.
    pub fn from_glyph(s: &str) -> Option<Self> {
        let base = s.strip_suffix('\u{FE0F}').unwrap_or(s);
        Unit::ALL
            .iter()
            .copied()
            .find(|unit| unit.glyph().trim_end_matches('\u{FE0F}') == base)
    }

    /// Single ASCII character used by tests, logs and the terminal view.
    pub fn mnemonic(&self) -> char {
        match self {
            Unit::Empty => '.',
            Unit::Player => '@',
            Unit::Coin => 'o',
            Unit::Banana => 'b',
            Unit::RedGorilla => 'R',
            Unit::BlueGorilla => 'B',
            Unit::SatiatedBlueGorilla => 'S',
            Unit::GreenBlock => 'g',
            Unit::RedBlock => '#',
            Unit::ArrowUp => '^',
            Unit::ArrowRight => '>',
            Unit::ArrowDown => 'v',
            Unit::ArrowLeft => '<',
        }
    }

    /// Parse an ASCII mnemonic (case-sensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_mordicus_types::Unit;
    ///
    /// assert_eq!(Unit::from_mnemonic('R'), Some(Unit::RedGorilla));
    /// assert_eq!(Unit::from_mnemonic('r'), None);
    /// ```
    pub fn from_mnemonic(c: char) -> Option<Self> {
        Unit::ALL.iter().copied().find(|unit| unit.mnemonic() == c)
    }

    /// Direction an arrow unit points to, `None` for every other unit.
    pub fn arrow_direction(&self) -> Option<Direction> {
        match self {
            Unit::ArrowUp => Some(Direction::Up),
            Unit::ArrowRight => Some(Direction::Right),
            Unit::ArrowDown => Some(Direction::Down),
            Unit::ArrowLeft => Some(Direction::Left),
            _ => None,
        }
    }

    #[inline(always)]
    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// A set of units, stored as a bitset over the `Unit` discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UnitSet(u16);

impl UnitSet {
    /// Build a set from a list of units (usable in `const` context).
    pub const fn of(units: &[Unit]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < units.len() {
            bits |= units[i].bit();
            i += 1;
        }
        UnitSet(bits)
    }

    /// Set containing a single unit.
    pub const fn single(unit: Unit) -> Self {
        UnitSet(unit.bit())
    }

    /// Union of two sets.
    pub const fn union(self, other: UnitSet) -> Self {
        UnitSet(self.0 | other.0)
    }

    #[inline(always)]
    pub const fn contains(&self, unit: Unit) -> bool {
        self.0 & unit.bit() != 0
    }
}

impl From<Unit> for UnitSet {
    fn from(unit: Unit) -> Self {
        UnitSet::single(unit)
    }
}

/// Units that capture the player by orthogonal adjacency.
pub const ATTACKERS: UnitSet = UnitSet::of(&[Unit::RedGorilla, Unit::BlueGorilla]);

/// Units that cannot be entered by any move (free or push).
pub const MOVE_BLOCKERS: UnitSet = UnitSet::of(&[Unit::RedBlock, Unit::SatiatedBlueGorilla]);

/// Units that halt a push chain; nothing may be pushed into them.
pub const PUSH_BLOCKERS: UnitSet =
    MOVE_BLOCKERS.union(UnitSet::of(&[Unit::RedGorilla, Unit::BlueGorilla, Unit::Coin]));

/// The four arrow units.
pub const ARROWS: UnitSet = UnitSet::of(&[
    Unit::ArrowUp,
    Unit::ArrowRight,
    Unit::ArrowDown,
    Unit::ArrowLeft,
]);

/// Units the player may push.
pub const MOVEABLES: UnitSet = ARROWS.union(UnitSet::of(&[Unit::Banana, Unit::GreenBlock]));

/// The four orthogonal directions.
///
/// Declaration order (Up, Right, Down, Left) is the evaluation order used
/// wherever several directions or neighbours are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in evaluation order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit displacement as `(d_row, d_col)`.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// The arrow unit pointing this way.
    pub fn arrow(&self) -> Unit {
        match self {
            Direction::Up => Unit::ArrowUp,
            Direction::Right => Unit::ArrowRight,
            Direction::Down => Unit::ArrowDown,
            Direction::Left => Unit::ArrowLeft,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

/// A grid position. Signed so that translation may leave the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Unchecked translation by one step in `dir`.
    #[inline(always)]
    pub fn forward(&self, dir: Direction) -> Self {
        let (dr, dc) = dir.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Session screens.
///
/// The core never reads this; it is shared by the session layer and the
/// terminal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Title,
    UsePassword,
    InputPassword,
    Level,
    Retry,
    Complete,
    GameOver,
    End,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Title => "title",
            Screen::UsePassword => "usePassword",
            Screen::InputPassword => "inputPassword",
            Screen::Level => "level",
            Screen::Retry => "retry",
            Screen::Complete => "complete",
            Screen::GameOver => "gameOver",
            Screen::End => "end",
        }
    }
}
