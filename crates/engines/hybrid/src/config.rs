//! Engine configuration, loaded from TOML.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! mode = "mcts_alphabeta"
//! move_time_ms = 2000
//! rollout_depth = 3
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::error::{ConfigError, ConfigResult};
use crate::rollout::MAX_ROLLOUT_DEPTH;

/// Which search picks the move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Tree search with uniform-random rollouts
    #[default]
    Mcts,
    /// Tree search whose leaves are scored by a shallow alpha-beta search
    #[serde(rename = "mcts_alphabeta")]
    MctsAlphaBeta,
    /// Iterative-deepening alpha-beta
    #[serde(rename = "alphabeta")]
    AlphaBeta,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchMode::Mcts => "mcts",
            SearchMode::MctsAlphaBeta => "mcts_alphabeta",
            SearchMode::AlphaBeta => "alphabeta",
        };
        f.write_str(name)
    }
}

impl FromStr for SearchMode {
    type Err = ConfigError;

    /// Case-insensitive; `-` and `_` are ignored so `MCTS-AlphaBeta` works.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "mcts" => Ok(SearchMode::Mcts),
            "mctsalphabeta" | "hybrid" => Ok(SearchMode::MctsAlphaBeta),
            "alphabeta" | "minimax" => Ok(SearchMode::AlphaBeta),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: SearchMode,
    /// Search budget per move
    pub move_time_ms: u64,
    /// Transposition table slots for the alpha-beta searches
    pub tt_entries: usize,
    /// Depth of the alpha-beta search that scores a tree leaf, at most
    /// [`MAX_ROLLOUT_DEPTH`]
    pub rollout_depth: u8,
    /// The `c` in `sqrt(c * ln N / n)`
    pub exploration: f64,
    /// Random rollouts longer than this are scored as draws
    pub max_rollout_plies: u32,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::Mcts,
            move_time_ms: 1000,
            tt_entries: classical_engine::DEFAULT_TT_ENTRIES,
            rollout_depth: 2,
            exploration: 2.0,
            max_rollout_plies: 400,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let mut config: Self = toml::from_str(contents)?;
        if config.rollout_depth > MAX_ROLLOUT_DEPTH {
            warn!(
                requested = config.rollout_depth,
                max = MAX_ROLLOUT_DEPTH,
                "clamping rollout_depth"
            );
            config.rollout_depth = MAX_ROLLOUT_DEPTH;
        }
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn move_time(&self) -> Duration {
        Duration::from_millis(self.move_time_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
