use crate::game_state::Phase;
use crate::piece::{Block, Piece};
use crate::types::{Position, ShapeKind, BOARD_COLS, BOARD_ROWS, PIECE_CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub cells: [Position; PIECE_CELLS],
    pub pivot: Position,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind(),
            cells: *value.cells(),
            pivot: value.pivot(),
        }
    }
}

/// Render-ready copy of the engine state.
///
/// `cells` is row-major and already contains the falling piece's blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub rows: i32,
    pub cols: i32,
    pub cells: Vec<Option<Block>>,
    pub active: Option<ActiveSnapshot>,
    pub phase: Phase,
    pub seed: Option<u64>,
    pub pieces_spawned: u32,
    pub rows_cleared: u32,
}

impl GameSnapshot {
    /// Reset to an empty reference board, keeping the cell allocation
    pub fn clear(&mut self) {
        self.rows = BOARD_ROWS;
        self.cols = BOARD_COLS;
        self.cells.clear();
        self.cells.resize((BOARD_ROWS * BOARD_COLS) as usize, None);
        self.active = None;
        self.phase = Phase::Spawning;
        self.seed = None;
        self.pieces_spawned = 0;
        self.rows_cleared = 0;
    }

    pub fn get(&self, pos: Position) -> Option<Block> {
        if pos.row < 0 || pos.row >= self.rows || pos.col < 0 || pos.col >= self.cols {
            return None;
        }
        self.cells
            .get((pos.row * self.cols + pos.col) as usize)
            .copied()
            .flatten()
    }

    pub fn is_active_cell(&self, pos: Position) -> bool {
        self.active.map_or(false, |a| a.cells.contains(&pos))
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            cells: Vec::new(),
            active: None,
            phase: Phase::Spawning,
            seed: None,
            pieces_spawned: 0,
            rows_cleared: 0,
        };
        s.clear();
        s
    }
}
