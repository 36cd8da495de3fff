//! Negamax search with alpha-beta pruning, iterative deepening and a
//! capture-only quiescence search at the horizon.
//!
//! Every child is searched on its own copy of the position; the Zobrist key
//! is carried down incrementally instead of being recomputed.

use chess_core::zobrist;
use chess_core::{Move, MoveGenerator, Position, TimeControl};
use tracing::debug;

use crate::eval::evaluate;
use crate::ordering::order_moves;
use crate::tt::{Bound, TranspositionTable};

/// Score of being mated at the root. Mate in `n` plies scores
/// `MATE_SCORE - n`, so shorter mates are preferred.
pub const MATE_SCORE: i32 = 100_000;
/// Window bound; larger than any reachable score.
pub const INFINITY: i32 = 1_000_000;
/// Added to the value returned on a beta cutoff so a move that provably
/// reaches the bound is preferred over one that merely equals it.
pub const CUTOFF_BONUS: i32 = 1;

const MAX_PLY: i32 = 256;

/// Result from [`Searcher::iterative_deepening`].
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    /// Best move and score of the last fully completed depth
    pub best_move: Option<(Move, i32)>,
    /// Deepest iteration that finished
    pub depth: u8,
    /// True if the clock ran out before `max_depth` was reached
    pub stopped: bool,
}

pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE - MAX_PLY
}

/// Mate scores are stored relative to the node, not the root.
fn score_to_tt(score: i32, ply: i32) -> i32 {
    if score >= MATE_SCORE - MAX_PLY {
        score + ply
    } else if score <= -(MATE_SCORE - MAX_PLY) {
        score - ply
    } else {
        score
    }
}

fn score_from_tt(score: i32, ply: i32) -> i32 {
    if score >= MATE_SCORE - MAX_PLY {
        score - ply
    } else if score <= -(MATE_SCORE - MAX_PLY) {
        score + ply
    } else {
        score
    }
}

/// One search over a borrowed transposition table and clock.
pub struct Searcher<'a> {
    gen: MoveGenerator<'static>,
    tt: &'a mut TranspositionTable,
    tc: &'a TimeControl,
    /// Keys of the positions before the one being searched, oldest first.
    /// Grows and shrinks with the search path.
    history: Vec<u64>,
    root_best: Option<(Move, i32)>,
    pub nodes: u64,
}

impl<'a> Searcher<'a> {
    /// `history` holds the keys of the game positions that led to the root,
    /// excluding the root itself.
    pub fn new(tt: &'a mut TranspositionTable, tc: &'a TimeControl, history: &[u64]) -> Self {
        Self {
            gen: MoveGenerator::global(),
            tt,
            tc,
            history: history.to_vec(),
            root_best: None,
            nodes: 0,
        }
    }

    /// Searches depth 1, 2, ... up to `max_depth` until the clock runs out.
    ///
    /// Only completed iterations are trusted. If not even depth 1 finishes,
    /// the first legal move in ordering is returned so the caller always
    /// has something to play.
    pub fn iterative_deepening(&mut self, pos: &Position, max_depth: u8) -> SearchOutcome {
        let hash = pos.zobrist_hash();
        let mut outcome = SearchOutcome {
            best_move: None,
            depth: 0,
            stopped: false,
        };

        for depth in 1..=max_depth.max(1) {
            match self.search_root(pos, hash, depth) {
                Some(result) => {
                    outcome.best_move = result;
                    outcome.depth = depth;
                    if let Some((mv, score)) = result {
                        debug!(
                            depth,
                            score,
                            nodes = self.nodes,
                            best = %mv,
                            elapsed_ms = self.tc.elapsed().as_millis() as u64,
                            "depth complete"
                        );
                        if is_mate_score(score) {
                            break;
                        }
                    } else {
                        // no legal moves
                        break;
                    }
                }
                None => {
                    outcome.stopped = true;
                    break;
                }
            }
            if self.tc.check_time() {
                outcome.stopped = depth < max_depth;
                break;
            }
        }

        if outcome.best_move.is_none() && outcome.stopped {
            let mut moves = self.gen.generate(pos, false);
            let hash_move = self.tt.probe(hash).and_then(|e| e.best_move);
            order_moves(pos, &mut moves, hash_move);
            outcome.best_move = moves.first().map(|&mv| (mv, 0));
        }
        outcome
    }

    /// Full-width search of the root at `depth`. Returns `None` if the clock
    /// stopped the iteration, `Some(None)` if there are no legal moves.
    pub fn search_root(
        &mut self,
        pos: &Position,
        hash: u64,
        depth: u8,
    ) -> Option<Option<(Move, i32)>> {
        self.root_best = None;
        let (_, stopped) = self.negamax(pos, hash, depth, 0, -INFINITY, INFINITY);
        if stopped {
            None
        } else {
            Some(self.root_best)
        }
    }

    /// Fixed-depth score of `pos` from the side to move, with no clock.
    /// Used to evaluate tree-search leaves.
    pub fn evaluate_to_depth(&mut self, pos: &Position, depth: u8) -> i32 {
        let hash = pos.zobrist_hash();
        let (score, _) = self.negamax(pos, hash, depth, 0, -INFINITY, INFINITY);
        score
    }

    /// Whether `hash` already occurred since the last capture or pawn move.
    fn is_repetition(&self, hash: u64, halfmove_clock: u32) -> bool {
        self.history
            .iter()
            .rev()
            .take(halfmove_clock as usize)
            .any(|&h| h == hash)
    }

    /// Recursive negamax search with alpha-beta pruning.
    ///
    /// Returns (score, stopped) where stopped indicates the clock ran out;
    /// a stopped score is meaningless and must be discarded.
    fn negamax(
        &mut self,
        pos: &Position,
        hash: u64,
        depth: u8,
        ply: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, bool) {
        self.nodes += 1;

        let mut moves = self.gen.generate(pos, false);
        if moves.is_empty() {
            if self.gen.is_in_check(pos) {
                return (-MATE_SCORE + ply, false);
            }
            return (0, false);
        }

        if ply > 0
            && (pos.is_fifty_move_draw()
                || pos.is_insufficient_material()
                || self.is_repetition(hash, pos.halfmove_clock))
        {
            return (0, false);
        }

        if depth == 0 {
            return self.quiescence(pos, ply, alpha, beta);
        }

        let alpha_orig = alpha;
        let mut hash_move = None;
        if let Some(entry) = self.tt.probe(hash) {
            hash_move = entry.best_move;
            if ply > 0 && entry.depth >= depth {
                let value = score_from_tt(entry.value, ply);
                match entry.bound {
                    Bound::Exact => return (value, false),
                    Bound::Lower => alpha = alpha.max(value),
                    Bound::Upper => beta = beta.min(value),
                }
                if alpha >= beta {
                    return (value, false);
                }
            }
        }

        order_moves(pos, &mut moves, hash_move);

        let mut best_move = None;
        for mv in moves {
            let mut child = pos.clone();
            let revoked = child.apply_move(mv);
            let child_hash = zobrist::update(hash, pos, mv, revoked, child.en_passant);

            self.history.push(hash);
            let (score, stopped) =
                self.negamax(&child, child_hash, depth - 1, ply + 1, -beta, -alpha);
            self.history.pop();

            if stopped || self.tc.check_time() {
                return (0, true);
            }
            let score = -score;

            if score > alpha {
                alpha = score;
                best_move = Some(mv);
                if ply == 0 {
                    self.root_best = Some((mv, score));
                }
            }
            if alpha >= beta {
                self.tt
                    .store(hash, depth, score_to_tt(beta, ply), Bound::Lower, Some(mv));
                return (beta + CUTOFF_BONUS, false);
            }
        }

        let bound = if alpha > alpha_orig {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.tt
            .store(hash, depth, score_to_tt(alpha, ply), bound, best_move.or(hash_move));

        (alpha, false)
    }

    /// Capture-only search with stand-pat, so the horizon never lands in
    /// the middle of an exchange.
    fn quiescence(&mut self, pos: &Position, ply: i32, mut alpha: i32, beta: i32) -> (i32, bool) {
        self.nodes += 1;
        if self.tc.should_check_time(self.nodes) && self.tc.check_time() {
            return (0, true);
        }

        let stand_pat = evaluate(pos);
        if stand_pat >= beta {
            return (beta, false);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut moves = self.gen.generate(pos, true);
        order_moves(pos, &mut moves, None);

        for mv in moves {
            let mut child = pos.clone();
            child.apply_move(mv);

            let (score, stopped) = self.quiescence(&child, ply + 1, -beta, -alpha);
            if stopped {
                return (0, true);
            }
            let score = -score;

            if score >= beta {
                return (beta, false);
            }
            if score > alpha {
                alpha = score;
            }
        }

        (alpha, false)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
