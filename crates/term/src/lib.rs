//! Terminal front end for the bomb-piece game.
//!
//! Renders engine snapshots into a framebuffer of styled cells (pure, unit
//! testable) and flushes that framebuffer to the terminal with crossterm,
//! rewriting only the cells that changed since the previous frame.
//!
//! Board cells are drawn 2 columns wide by default to offset the terminal
//! glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_tetrad_core as core;
pub use tui_tetrad_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::TerminalRenderer;
