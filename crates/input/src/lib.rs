//! Terminal input module (engine-facing).
//!
//! Maps discrete `crossterm` key presses into [`crate::types::Intent`]s, one
//! press per intent. There is no auto-repeat handling: a held key is whatever
//! the terminal's own repeat delivers.

pub mod map;

pub use tui_tetrad_types as types;

pub use map::{intent_for_key, should_quit};
