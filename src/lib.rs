//! Tetrad: a falling-block game with a bomb piece (workspace facade crate).
//!
//! The engine, input mapping and terminal front end live in dedicated crates
//! under `crates/`; this package re-exports them as
//! `tui_tetrad::{core,input,term,types}` and adds the runtime pieces used by
//! the binary: environment [`config`] and the JSON-lines [`event_log`].

pub use tui_tetrad_core as core;
pub use tui_tetrad_input as input;
pub use tui_tetrad_term as term;
pub use tui_tetrad_types as types;

pub mod config;
pub mod event_log;

pub use config::Config;
pub use event_log::EventLog;
