//! Classical Chess Engine
//!
//! Iterative-deepening negamax with alpha-beta pruning, a transposition
//! table, MVV-LVA move ordering, quiescence search and a material plus
//! mop-up evaluation. The tree-search engine also borrows [`Searcher`] to
//! score its leaves.

mod eval;
mod ordering;
mod search;
mod tt;

use chess_core::{Engine, Position, SearchLimits, SearchResult};

pub use eval::{endgame_weight, evaluate};
pub use ordering::{order_moves, score_move};
pub use search::{is_mate_score, SearchOutcome, Searcher, CUTOFF_BONUS, INFINITY, MATE_SCORE};
pub use tt::{Bound, TranspositionTable, TtEntry};

/// Transposition table size used by [`ClassicalEngine::new`].
pub const DEFAULT_TT_ENTRIES: usize = 1 << 18;

/// Classical chess engine using negamax with alpha-beta pruning.
///
/// The transposition table persists between searches of the same game and
/// is cleared by `new_game`. Positions of the game so far can be supplied
/// with [`ClassicalEngine::set_game_history`] so repetitions are scored as
/// draws.
#[derive(Debug)]
pub struct ClassicalEngine {
    tt: TranspositionTable,
    /// Zobrist keys of the positions before the one to be searched
    history: Vec<u64>,
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self::with_tt_entries(DEFAULT_TT_ENTRIES)
    }

    pub fn with_tt_entries(entries: usize) -> Self {
        Self {
            tt: TranspositionTable::new(entries),
            history: Vec::new(),
            nodes: 0,
        }
    }

    /// Keys of the game positions preceding the next searched position,
    /// oldest first.
    pub fn set_game_history(&mut self, hashes: &[u64]) {
        self.history.clear();
        self.history.extend_from_slice(hashes);
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        limits.start();

        let mut searcher = Searcher::new(&mut self.tt, &limits.time_control, &self.history);
        let outcome = searcher.iterative_deepening(pos, limits.depth);
        self.nodes = searcher.nodes;

        SearchResult {
            best_move: outcome.best_move.map(|(mv, _)| mv),
            score: outcome.best_move.map(|(_, s)| s).unwrap_or(0),
            depth: outcome.depth,
            nodes: self.nodes,
            stopped: outcome.stopped,
        }
    }

    fn name(&self) -> &str {
        "Classical v2.0"
    }

    fn new_game(&mut self) {
        self.tt.clear();
        self.history.clear();
        self.nodes = 0;
    }

    /// `Hash` resizes the transposition table, in megabytes.
    fn set_option(&mut self, name: &str, value: &str) -> bool {
        if !name.eq_ignore_ascii_case("hash") {
            return false;
        }
        match value.trim().parse::<usize>() {
            Ok(mb) if mb > 0 => {
                self.tt = TranspositionTable::with_megabytes(mb);
                true
            }
            _ => false,
        }
    }
}
