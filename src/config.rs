//! Runtime configuration read from the environment.
//!
//! Environment variables:
//! - `TETRAD_TICK_MS`: gravity interval in milliseconds (default: 1000)
//! - `TETRAD_SEED`: fixed seed for the shape sequence (default: random)
//! - `TETRAD_LOG_PATH`: append engine events as JSON lines to this file
//!
//! Values that do not parse fall back to the default.

use std::path::PathBuf;
use std::time::Duration;

use crate::types::TICK_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tick_ms: u64,
    pub seed: Option<u64>,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS as u64,
            seed: None,
            log_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tick_ms = lookup("TETRAD_TICK_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(TICK_MS as u64);

        let seed = lookup("TETRAD_SEED").and_then(|s| s.trim().parse().ok());

        let log_path = lookup("TETRAD_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            tick_ms,
            seed,
            log_path,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
