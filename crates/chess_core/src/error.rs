use thiserror::Error;

use crate::types::Color;

/// Why a FEN string could not be turned into a [`Position`](crate::Position).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 space-separated fields, found {0}")]
    FieldCount(usize),

    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 files: {text:?}")]
    RankWidth { rank: u8, text: String },

    #[error("invalid piece character {0:?}")]
    InvalidPiece(char),

    #[error("invalid side to move {0:?}")]
    InvalidSideToMove(String),

    #[error("invalid castling character {0:?}")]
    InvalidCastling(char),

    #[error("invalid en-passant square {0:?}")]
    InvalidEnPassant(String),

    #[error("invalid move counter {0:?}")]
    InvalidCounter(String),

    #[error("{color:?} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: u32 },
}

pub type FenResult<T> = Result<T, FenError>;
