//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the piece algorithm and the board engine. It has no
//! dependencies on terminal, input or file I/O, making it:
//!
//! - **Deterministic**: shape kinds come from an injected [`ShapeSource`], so a seed
//!   (or a script) reproduces a game exactly
//! - **Testable**: every rule is exercised by unit tests
//! - **Portable**: runs headless as well as behind the terminal front end
//!
//! # Module Structure
//!
//! - [`grid`]: bounded 2D occupancy store
//! - [`piece`]: spawn table, atomic translate/rotate with rollback, bomb target row
//! - [`rng`]: shape sources (seeded uniform draw, scripted sequence)
//! - [`game_state`]: spawn / fall / lock / clear / game-over state machine
//! - [`snapshot`]: render-ready copy of the engine state
//!
//! # Game Rules
//!
//! - **Uniform draw** over seven tetrominoes plus the 2x2 **bomb**
//! - **Pivot rotation**: quarter turn about a fixed pivot cell, no wall kicks
//! - **Lock** as soon as a downward move fails (no lock delay)
//! - **Row clears** cascade bottom-up; a locked bomb clears its own row instead,
//!   full or not
//! - **Game over** when a non-bomb piece is about to spawn while row 4 holds a block
//!
//! # Example
//!
//! ```
//! use tui_tetrad_core::{GameState, ScriptedShapes, TickOutcome};
//! use tui_tetrad_types::{Intent, ShapeKind};
//!
//! let mut game = GameState::new(ScriptedShapes::repeat(ShapeKind::I));
//! game.start();
//!
//! // The vertical I starts in rows 0-3 and falls 16 rows before resting.
//! for _ in 0..16 {
//!     assert_eq!(game.tick(), TickOutcome::Fell);
//! }
//! assert!(matches!(game.tick(), TickOutcome::Locked(_)));
//!
//! assert!(game.apply(Intent::MoveLeft));
//! assert_eq!(game.pieces_spawned(), 2);
//! ```

pub mod game_state;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use tui_tetrad_types as types;

// Re-export commonly used types for convenience
pub use game_state::{ClearedRows, EngineEvent, GameState, LockReport, Phase, TickOutcome};
pub use grid::BoundedGrid;
pub use piece::{spawn_cells, Block, Piece};
pub use rng::{ScriptedShapes, ShapeSource, UniformShapes};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
