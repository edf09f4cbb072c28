//! Grid module - bounded 2D occupancy store
//!
//! A fixed-size grid where each cell is empty or holds one occupant.
//! Uses a flat vector in row-major order for cache locality.
//! Coordinates: (row, col) where row 0 is the top and col 0 is the left edge.

use crate::types::Position;

/// Bounded grid of optional occupants, row-major storage
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedGrid<T> {
    rows: i32,
    cols: i32,
    cells: Vec<Option<T>>,
}

impl<T> BoundedGrid<T> {
    /// Create an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn new(rows: i32, cols: i32) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        let len = (rows as usize) * (cols as usize);
        let mut cells = Vec::with_capacity(len);
        cells.resize_with(len, || None);
        Self { rows, cols, cells }
    }

    /// Calculate flat index, `None` when out of bounds
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.is_valid(pos) {
            return None;
        }
        Some((pos.row as usize) * (self.cols as usize) + (pos.col as usize))
    }

    /// (rows, cols)
    pub fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Check if position lies within bounds
    pub fn is_valid(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    /// Check if position is within bounds and unoccupied
    pub fn is_empty_at(&self, pos: Position) -> bool {
        matches!(self.index(pos), Some(idx) if self.cells[idx].is_none())
    }

    /// Occupant at `pos`; `None` when empty or out of bounds
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index(pos).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Place `value` at `pos`, returning the previous occupant.
    ///
    /// Out-of-bounds writes are refused and `value` is dropped; callers check
    /// [`is_valid`](Self::is_valid) first.
    pub fn put(&mut self, value: T, pos: Position) -> Option<T> {
        let idx = self.index(pos)?;
        self.cells[idx].replace(value)
    }

    /// Take the occupant out of `pos`
    pub fn remove(&mut self, pos: Position) -> Option<T> {
        let idx = self.index(pos)?;
        self.cells[idx].take()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Positions of all occupants, row-major
    pub fn occupied_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let cols = self.cols as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_some())
            .map(move |(idx, _)| Position::new((idx / cols) as i32, (idx % cols) as i32))
    }

    /// Check whether every column of `row` is occupied
    pub fn is_row_full(&self, row: i32) -> bool {
        if row < 0 || row >= self.rows {
            return false;
        }
        let start = (row as usize) * (self.cols as usize);
        let end = start + self.cols as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Check whether any column of `row` is occupied
    pub fn is_row_touched(&self, row: i32) -> bool {
        if row < 0 || row >= self.rows {
            return false;
        }
        let start = (row as usize) * (self.cols as usize);
        let end = start + self.cols as usize;
        self.cells[start..end].iter().any(|cell| cell.is_some())
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Option<T>] {
        &self.cells
    }

    /// Empty the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}
