//! Game state module - the board engine
//!
//! Owns the grid and the active piece and runs the cycle
//! `Spawning -> Falling -> Locked -> Clearing -> (Spawning | GameOver)`.
//!
//! All mutation goes through `&mut self`, so the grid and the active piece are
//! always updated together; a caller that shares a `GameState` across threads
//! must wrap the whole value in one lock.

use std::mem;

use crate::grid::BoundedGrid;
use crate::piece::{Block, Piece};
use crate::rng::{ShapeSource, UniformShapes};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    Intent, Position, ShapeKind, BOARD_COLS, BOARD_ROWS, MIN_COLS, MIN_ROWS, SPAWN_BUFFER_ROW,
};

/// Engine state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Spawning,
    Falling,
    Locked,
    Clearing,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Spawning => "spawning",
            Phase::Falling => "falling",
            Phase::Locked => "locked",
            Phase::Clearing => "clearing",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Rows cleared by one lock, as the row index at which each clear happened.
///
/// Usually at most four, but full rows left behind by a bomb lock are swept
/// up by the next normal lock, so there is no fixed bound.
pub type ClearedRows = Vec<i32>;

/// What happened when a piece locked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockReport {
    pub kind: ShapeKind,
    pub bomb: bool,
    pub cleared_rows: ClearedRows,
    /// The follow-up spawn was refused
    pub game_over: bool,
}

/// Result of one gravity step (or a hard drop)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is falling (not started, or already over)
    Idle,
    /// The active piece moved down one row
    Fell,
    /// The piece locked and the next one spawned
    Locked(LockReport),
    /// The piece locked and the game ended before the next spawn
    GameOver(LockReport),
}

impl TickOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, TickOutcome::GameOver(_))
    }

    pub fn lock_report(&self) -> Option<&LockReport> {
        match self {
            TickOutcome::Locked(r) | TickOutcome::GameOver(r) => Some(r),
            TickOutcome::Idle | TickOutcome::Fell => None,
        }
    }
}

/// Engine events, drained by observers such as the event log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Spawned { kind: ShapeKind, piece: u32 },
    Locked { kind: ShapeKind, row: i32 },
    RowsCleared { rows: ClearedRows, bomb: bool },
    GameOver { pieces_spawned: u32, rows_cleared: u32 },
}

/// Complete engine state
#[derive(Debug, Clone)]
pub struct GameState<S = UniformShapes> {
    grid: BoundedGrid<Block>,
    active: Option<Piece>,
    phase: Phase,
    source: S,
    started: bool,
    pieces_spawned: u32,
    rows_cleared: u32,
    events: Vec<EngineEvent>,
}

impl GameState<UniformShapes> {
    /// Reference 20x10 board with a uniform shape draw from `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(UniformShapes::new(seed))
    }
}

impl<S: ShapeSource> GameState<S> {
    /// Reference 20x10 board
    pub fn new(source: S) -> Self {
        Self::with_dimensions(BOARD_ROWS, BOARD_COLS, source)
    }

    /// # Panics
    ///
    /// Panics if the board is smaller than `MIN_ROWS` x `MIN_COLS`.
    pub fn with_dimensions(rows: i32, cols: i32, source: S) -> Self {
        assert!(
            rows >= MIN_ROWS && cols >= MIN_COLS,
            "board must be at least {}x{}, got {}x{}",
            MIN_ROWS,
            MIN_COLS,
            rows,
            cols
        );

        Self {
            grid: BoundedGrid::new(rows, cols),
            active: None,
            phase: Phase::Spawning,
            source,
            started: false,
            pieces_spawned: 0,
            rows_cleared: 0,
            events: Vec::new(),
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn grid(&self) -> &BoundedGrid<Block> {
        &self.grid
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn seed(&self) -> Option<u64> {
        self.source.seed()
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    /// Put a locked block on an empty cell (board setup, puzzles, tests).
    ///
    /// Returns false when the cell is out of bounds or occupied, including by
    /// the active piece.
    pub fn place_block(&mut self, pos: Position, kind: ShapeKind) -> bool {
        if !self.grid.is_empty_at(pos) {
            return false;
        }
        self.grid.put(Block::new(kind), pos);
        true
    }

    /// Game-over predicate: the stack has reached the spawn-buffer row
    pub fn spawn_buffer_occupied(&self) -> bool {
        self.grid.is_row_touched(SPAWN_BUFFER_ROW)
    }

    /// Spawn the next piece at the top-middle.
    ///
    /// Ends the game instead when the next piece is not a bomb and the
    /// spawn-buffer row is occupied, or when the spawn cells are taken.
    pub fn spawn(&mut self) -> bool {
        if self.phase == Phase::GameOver || self.active.is_some() {
            return false;
        }
        self.phase = Phase::Spawning;

        let kind = self.source.next_shape();
        if !kind.is_bomb() && self.spawn_buffer_occupied() {
            self.end_game();
            return false;
        }

        let Some(piece) = Piece::spawn(kind, &mut self.grid) else {
            self.end_game();
            return false;
        };

        self.active = Some(piece);
        self.phase = Phase::Falling;
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.events.push(EngineEvent::Spawned {
            kind,
            piece: self.pieces_spawned,
        });
        true
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        self.events.push(EngineEvent::GameOver {
            pieces_spawned: self.pieces_spawned,
            rows_cleared: self.rows_cleared,
        });
    }

    /// One gravity step: move down a row, or lock when that fails
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Falling {
            return TickOutcome::Idle;
        }
        let Some(piece) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };

        if piece.translate(&mut self.grid, 1, 0) {
            TickOutcome::Fell
        } else {
            self.lock_piece()
        }
    }

    /// Lock the active piece, clear rows, and spawn the next piece
    fn lock_piece(&mut self) -> TickOutcome {
        let Some(piece) = self.active.take() else {
            return TickOutcome::Idle;
        };

        self.phase = Phase::Locked;
        let kind = piece.kind();
        self.events.push(EngineEvent::Locked {
            kind,
            row: piece.row(),
        });

        self.phase = Phase::Clearing;
        let cleared_rows = if piece.is_bomb() {
            let row = piece.row();
            self.clear_row(row);
            vec![row]
        } else {
            self.clear_completed_rows()
        };

        if !cleared_rows.is_empty() {
            self.rows_cleared = self
                .rows_cleared
                .wrapping_add(cleared_rows.len() as u32);
            self.events.push(EngineEvent::RowsCleared {
                rows: cleared_rows.clone(),
                bomb: piece.is_bomb(),
            });
        }

        let spawned = self.spawn();
        let report = LockReport {
            kind,
            bomb: piece.is_bomb(),
            cleared_rows,
            game_over: !spawned,
        };

        if spawned {
            TickOutcome::Locked(report)
        } else {
            TickOutcome::GameOver(report)
        }
    }

    /// Empty `row`, then drop every block above it by one row, column by column
    fn clear_row(&mut self, row: i32) {
        if row < 0 || row >= self.grid.rows() {
            return;
        }

        for col in 0..self.grid.cols() {
            self.grid.remove(Position::new(row, col));
            for r in (0..row).rev() {
                if let Some(block) = self.grid.remove(Position::new(r, col)) {
                    self.grid.put(block, Position::new(r + 1, col));
                }
            }
        }
    }

    /// Scan bottom-up and clear every complete row.
    ///
    /// After a clear the same index is checked again, since the row that slid
    /// into it may be complete too.
    fn clear_completed_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut row = self.grid.rows() - 1;

        while row >= 0 {
            if self.grid.is_row_full(row) {
                self.clear_row(row);
                cleared.push(row);
            } else {
                row -= 1;
            }
        }

        cleared
    }

    /// Run `f` on the active piece while falling
    fn with_active(&mut self, f: impl FnOnce(&mut Piece, &mut BoundedGrid<Block>) -> bool) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        match self.active.as_mut() {
            Some(piece) => f(piece, &mut self.grid),
            None => false,
        }
    }

    pub fn rotate(&mut self) -> bool {
        self.with_active(|piece, grid| piece.rotate(grid))
    }

    pub fn move_left(&mut self) -> bool {
        self.with_active(|piece, grid| piece.translate(grid, 0, -1))
    }

    pub fn move_right(&mut self) -> bool {
        self.with_active(|piece, grid| piece.translate(grid, 0, 1))
    }

    /// Move down one row. A failed soft drop does not lock; the next tick does.
    pub fn soft_drop(&mut self) -> bool {
        self.with_active(|piece, grid| piece.translate(grid, 1, 0))
    }

    /// Drop until blocked, then lock
    pub fn hard_drop(&mut self) -> TickOutcome {
        if self.phase != Phase::Falling {
            return TickOutcome::Idle;
        }
        while self.soft_drop() {}
        self.lock_piece()
    }

    /// Apply a player intent; true when the board changed
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Rotate => self.rotate(),
            Intent::MoveLeft => self.move_left(),
            Intent::MoveRight => self.move_right(),
            Intent::SoftDrop => self.soft_drop(),
            Intent::HardDrop => !matches!(self.hard_drop(), TickOutcome::Idle),
        }
    }

    /// Take and clear pending engine events
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let (rows, cols) = self.grid.dimensions();
        out.rows = rows;
        out.cols = cols;
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.phase = self.phase;
        out.seed = self.source.seed();
        out.pieces_spawned = self.pieces_spawned;
        out.rows_cleared = self.rows_cleared;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState<UniformShapes> {
    fn default() -> Self {
        Self::seeded(1)
    }
}
