//! Chess rules on bitboards: magic attack tables, a legal move generator,
//! incremental Zobrist hashing and perft, plus the [`Engine`] trait every
//! search implements.

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod error;
pub mod fen;
pub mod magic;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use attacks::AttackTables;
pub use bitboard::*;
pub use board::*;
pub use error::{FenError, FenResult};
pub use fen::{MAX_MOVE_COUNTER, START_FEN};
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use time_control::*;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

/// What a search hands back.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal move
    pub best_move: Option<Move>,
    /// Centipawns for the side to move
    pub score: i32,
    /// Deepest completed iteration; 0 for tree search
    pub depth: u8,
    /// Nodes (alpha-beta) or iterations (MCTS) searched
    pub nodes: u64,
    pub stopped: bool,
}

/// A move-choosing search. The UCI loop and the game facade only talk to
/// searches through this trait.
pub trait Engine: Send {
    /// Picks a move for `pos` within `limits`.
    ///
    /// Implementations start `limits.time_control` themselves and must still
    /// return a legal move if the clock runs out early.
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult;

    fn name(&self) -> &str;

    /// Drops anything learned from the previous game.
    fn new_game(&mut self) {}

    /// Applies a named option. Returns false if the name or value is not
    /// accepted.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
