//! Error types for the game facade and configuration loading.

use std::path::PathBuf;

use chess_core::FenError;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Well-formed move that is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Text that is not a UCI move at all.
    #[error("unparsable move text: {0:?}")]
    InvalidMoveText(String),

    #[error("invalid FEN: {0}")]
    Fen(#[from] FenError),
}

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown search mode {0:?} (expected mcts, mcts_alphabeta or alphabeta)")]
    UnknownMode(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
