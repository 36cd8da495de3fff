//! Hybrid Chess Engine
//!
//! Monte-Carlo tree search whose leaves are scored either by random
//! playouts or by a shallow alpha-beta search, plus a [`Game`] facade that
//! keeps a position, its repetition history and both searches together.

mod config;
mod error;
mod game;
mod mcts;
mod rollout;
mod tree;

pub use config::{EngineConfig, SearchMode};
pub use error::{ConfigError, ConfigResult, GameError, GameResult};
pub use game::Game;
pub use mcts::{MctsEngine, MctsSettings, DEFAULT_ITERATIONS};
pub use rollout::{
    adjudicate, alpha_beta_rollout, centipawns, random_rollout, win_probability, Rollout, DRAW,
    LOSS, MAX_ROLLOUT_DEPTH, WIN,
};
pub use tree::{ChildStats, Node, NodeId, Tree, ROOT};
