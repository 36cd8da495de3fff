//! Move ordering: hash move, then captures by MVV-LVA, then promotions,
//! then everything else.

use chess_core::{Move, Position};

const HASH_MOVE: i32 = 1_000_000;
const CAPTURE: i32 = 100_000;
const PROMOTION: i32 = 50_000;

/// Sort key for `mv`; higher is searched first.
pub fn score_move(pos: &Position, mv: Move, hash_move: Option<Move>) -> i32 {
    if hash_move == Some(mv) {
        return HASH_MOVE;
    }
    let mut score = 0;
    if let Some(victim) = pos.captured_piece(mv) {
        // most valuable victim, then least valuable attacker
        score += CAPTURE + 10 * victim.kind.value() - mv.piece.kind.value();
    }
    if let Some(promo) = mv.promo {
        score += PROMOTION + promo.value();
    }
    score
}

/// Orders `moves` best-first in place.
pub fn order_moves(pos: &Position, moves: &mut [Move], hash_move: Option<Move>) {
    moves.sort_by_cached_key(|&mv| std::cmp::Reverse(score_move(pos, mv, hash_move)));
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
