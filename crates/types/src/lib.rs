//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, input mapping, logging).
//!
//! # Board Dimensions
//!
//! Reference playfield dimensions:
//!
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Spawn row**: 0, centered on column `cols / 2`
//! - **Spawn-buffer row**: 4, any locked block here ends the game
//!
//! # Examples
//!
//! ```
//! use tui_tetrad_types::{Color, Intent, Position, ShapeKind, BOARD_COLS, BOARD_ROWS};
//!
//! let pos = Position::new(3, 5);
//! assert_eq!(pos.offset(1, -1), Position::new(4, 4));
//!
//! assert_eq!(ShapeKind::Bomb.color(), Color::Orange);
//! assert!(ShapeKind::Bomb.is_bomb());
//! assert_eq!(ShapeKind::ALL.len(), 8);
//!
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//!
//! assert_eq!(BOARD_ROWS, 20);
//! assert_eq!(BOARD_COLS, 10);
//! ```

/// Board height in cells (20 rows)
pub const BOARD_ROWS: i32 = 20;

/// Board width in cells (10 columns)
pub const BOARD_COLS: i32 = 10;

/// Row checked before every spawn; an occupant here means the stack reached the spawn area.
pub const SPAWN_BUFFER_ROW: i32 = 4;

/// Smallest board the spawn table fits on (S reaches `m - 2`, Z reaches `m + 2`).
pub const MIN_COLS: i32 = 5;

/// Smallest board that holds a vertical I piece above the spawn-buffer row.
pub const MIN_ROWS: i32 = SPAWN_BUFFER_ROW + 1;

/// Gravity interval in milliseconds (one row per second)
pub const TICK_MS: u32 = 1000;

/// Number of cells in every piece
pub const PIECE_CELLS: usize = 4;

/// A (row, column) grid coordinate. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position shifted by the given deltas
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Quarter turn of `self` around `pivot`.
    ///
    /// Expressed through the diagonal swap `(pr - pc + c, pr + pc - r)`.
    pub const fn rotated_about(self, pivot: Position) -> Self {
        Self {
            row: pivot.row - pivot.col + self.col,
            col: pivot.row + pivot.col - self.row,
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

/// Block colors, one per shape kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Gray,
    Cyan,
    Yellow,
    Magenta,
    Blue,
    Green,
    Orange,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Gray => "gray",
            Color::Cyan => "cyan",
            Color::Yellow => "yellow",
            Color::Magenta => "magenta",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Orange => "orange",
        }
    }
}

/// The eight piece kinds: seven tetrominoes plus the 2x2 bomb
///
/// Colors are fixed per kind:
/// - **I**: Red, vertical bar
/// - **T**: Gray
/// - **O**: Cyan, 2x2 square
/// - **L**: Yellow
/// - **J**: Magenta
/// - **S**: Blue
/// - **Z**: Green
/// - **Bomb**: Orange, 2x2 square that clears its row on lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    T,
    O,
    L,
    J,
    S,
    Z,
    Bomb,
}

impl ShapeKind {
    /// Every kind, in draw-table order
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::O,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::Bomb,
    ];

    pub fn is_bomb(&self) -> bool {
        matches!(self, ShapeKind::Bomb)
    }

    pub fn color(&self) -> Color {
        match self {
            ShapeKind::I => Color::Red,
            ShapeKind::T => Color::Gray,
            ShapeKind::O => Color::Cyan,
            ShapeKind::L => Color::Yellow,
            ShapeKind::J => Color::Magenta,
            ShapeKind::S => Color::Blue,
            ShapeKind::Z => Color::Green,
            ShapeKind::Bomb => Color::Orange,
        }
    }

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tetrad_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("BOMB"), Some(ShapeKind::Bomb));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "t" => Some(ShapeKind::T),
            "o" => Some(ShapeKind::O),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "bomb" | "b" => Some(ShapeKind::Bomb),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::T => "t",
            ShapeKind::O => "o",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::Bomb => "bomb",
        }
    }
}

/// Player intents delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Rotate,
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
}

impl Intent {
    /// Parse intent from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotate" => Some(Intent::Rotate),
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "harddrop" => Some(Intent::HardDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Rotate => "rotate",
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::HardDrop => "hardDrop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_defaults() {
        assert_eq!(BOARD_ROWS, 20);
        assert_eq!(BOARD_COLS, 10);
        assert_eq!(SPAWN_BUFFER_ROW, 4);
        assert_eq!(TICK_MS, 1000);
        assert!(BOARD_ROWS >= MIN_ROWS);
        assert!(BOARD_COLS >= MIN_COLS);
    }

    #[test]
    fn test_rotated_about_quarter_turn() {
        let pivot = Position::new(1, 5);
        // Cell above the pivot swings to its right.
        assert_eq!(Position::new(0, 5).rotated_about(pivot), Position::new(1, 6));
        // Pivot is a fixed point.
        assert_eq!(pivot.rotated_about(pivot), pivot);
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let pivot = Position::new(7, 3);
        let start = Position::new(9, 4);
        let mut p = start;
        for _ in 0..4 {
            p = p.rotated_about(pivot);
        }
        assert_eq!(p, start);
    }

    #[test]
    fn test_only_bomb_is_bomb() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.is_bomb(), kind == ShapeKind::Bomb);
        }
    }

    #[test]
    fn test_kind_colors_are_distinct() {
        for (i, a) in ShapeKind::ALL.iter().enumerate() {
            for b in &ShapeKind::ALL[i + 1..] {
                assert_ne!(a.color(), b.color(), "{:?} and {:?} share a color", a, b);
            }
        }
    }

    #[test]
    fn test_kind_str_roundtrip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_intent_parse() {
        assert_eq!(Intent::from_str("ROTATE"), Some(Intent::Rotate));
        assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
        assert_eq!(Intent::from_str("hold"), None);
    }
}
