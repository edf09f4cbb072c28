//! Piece module - the active four-cell piece and its atomic moves
//!
//! A [`Piece`] lives *inside* the grid: its four cells are ordinary grid
//! occupants while it falls. Every move lifts the four blocks out, checks the
//! candidate cells, and either commits all four or puts the originals back.
//!
//! Rotation is a quarter turn about the pivot cell using the diagonal swap
//! `(pr - pc + c, pr + pc - r)`. There are no wall kicks: a rotation that
//! leaves the board or hits a block fails and the piece stays put.

use crate::grid::BoundedGrid;
use crate::rng::ShapeSource;
use crate::types::{Color, Position, ShapeKind, PIECE_CELLS};

/// A locked or falling cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub kind: ShapeKind,
    pub color: Color,
}

impl Block {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            color: kind.color(),
        }
    }
}

/// Cell offsets (d_row, d_col) from (0, middle column), plus the pivot's slot.
type SpawnLayout = ([(i32, i32); PIECE_CELLS], usize);

/// Spawn layout for a shape kind.
///
/// The slot order matters: [`Piece::row`] reads the fourth cell.
fn spawn_layout(kind: ShapeKind) -> SpawnLayout {
    match kind {
        ShapeKind::I => ([(0, 0), (1, 0), (2, 0), (3, 0)], 1),
        ShapeKind::T => ([(0, -1), (0, 0), (0, 1), (1, 0)], 1),
        ShapeKind::O => ([(0, -1), (0, 0), (1, -1), (1, 0)], 0),
        ShapeKind::L => ([(0, 0), (1, 0), (2, 0), (2, 1)], 1),
        ShapeKind::J => ([(0, 0), (1, 0), (2, 0), (2, -1)], 1),
        ShapeKind::S => ([(0, -1), (0, 0), (1, -1), (1, -2)], 1),
        ShapeKind::Z => ([(0, 1), (0, 0), (1, 1), (1, 2)], 1),
        ShapeKind::Bomb => ([(0, -1), (0, 0), (1, -1), (1, 0)], 0),
    }
}

/// Spawn cells and pivot for `kind` on a grid `cols` wide
pub fn spawn_cells(kind: ShapeKind, cols: i32) -> ([Position; PIECE_CELLS], Position) {
    let mid = cols / 2;
    let (offsets, pivot_slot) = spawn_layout(kind);
    let cells = offsets.map(|(dr, dc)| Position::new(dr, mid + dc));
    (cells, cells[pivot_slot])
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: ShapeKind,
    cells: [Position; PIECE_CELLS],
    /// Rotation center; always one of `cells`
    pivot: Position,
}

impl Piece {
    /// Place a new piece of `kind` at the top-middle of the grid.
    ///
    /// Returns `None` and leaves the grid untouched when any spawn cell is
    /// out of bounds or already occupied.
    pub fn spawn(kind: ShapeKind, grid: &mut BoundedGrid<Block>) -> Option<Self> {
        let (cells, pivot) = spawn_cells(kind, grid.cols());
        if !cells.iter().all(|&p| grid.is_empty_at(p)) {
            return None;
        }

        let piece = Self { kind, cells, pivot };
        piece.place(grid, &cells);
        Some(piece)
    }

    /// Draw a kind from `source` and spawn it
    pub fn random<S: ShapeSource + ?Sized>(
        source: &mut S,
        grid: &mut BoundedGrid<Block>,
    ) -> Option<Self> {
        Self::spawn(source.next_shape(), grid)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    pub fn is_bomb(&self) -> bool {
        self.kind.is_bomb()
    }

    pub fn block(&self) -> Block {
        Block::new(self.kind)
    }

    pub fn cells(&self) -> &[Position; PIECE_CELLS] {
        &self.cells
    }

    pub fn pivot(&self) -> Position {
        self.pivot
    }

    /// Row of the fourth stored cell.
    ///
    /// For a bomb this is its bottom row, the row it clears on lock.
    pub fn row(&self) -> i32 {
        self.cells[PIECE_CELLS - 1].row
    }

    /// Shift the piece by (d_row, d_col). All-or-nothing.
    pub fn translate(&mut self, grid: &mut BoundedGrid<Block>, d_row: i32, d_col: i32) -> bool {
        let candidates = self.cells.map(|p| p.offset(d_row, d_col));
        if self.relocate(grid, candidates) {
            self.pivot = self.pivot.offset(d_row, d_col);
            true
        } else {
            false
        }
    }

    /// Quarter turn about the pivot. All-or-nothing.
    pub fn rotate(&mut self, grid: &mut BoundedGrid<Block>) -> bool {
        let pivot = self.pivot;
        let candidates = self.cells.map(|p| p.rotated_about(pivot));
        self.relocate(grid, candidates)
    }

    /// Lift the blocks, validate `candidates`, then commit or roll back.
    fn relocate(
        &mut self,
        grid: &mut BoundedGrid<Block>,
        candidates: [Position; PIECE_CELLS],
    ) -> bool {
        self.lift(grid);

        if candidates.iter().all(|&p| grid.is_empty_at(p)) {
            self.place(grid, &candidates);
            self.cells = candidates;
            true
        } else {
            let original = self.cells;
            self.place(grid, &original);
            false
        }
    }

    fn lift(&self, grid: &mut BoundedGrid<Block>) {
        for &p in &self.cells {
            grid.remove(p);
        }
    }

    fn place(&self, grid: &mut BoundedGrid<Block>, at: &[Position; PIECE_CELLS]) {
        let block = self.block();
        for &p in at {
            grid.put(block, p);
        }
    }
}
