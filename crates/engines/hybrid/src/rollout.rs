//! Leaf evaluation: random playouts and alpha-beta scores turned into win
//! probabilities.
//!
//! All values here are from the point of view of the side to move in the
//! position passed in: 1.0 is a win, 0.5 a draw, 0.0 a loss.

use chess_core::{Color, MoveGenerator, PieceKind, Position, TimeControl};
use classical_engine::{Searcher, TranspositionTable};
use rand::seq::SliceRandom;
use rand::Rng;

pub const WIN: f64 = 1.0;
pub const DRAW: f64 = 0.5;
pub const LOSS: f64 = 0.0;

/// Centipawn difference that moves the win probability from 0.5 to about
/// 0.73.
const SIGMOID_SCALE: f64 = 400.0;

/// Deepest alpha-beta search run at a tree leaf. Leaf searches ignore the
/// move clock, so their depth is capped instead.
pub const MAX_ROLLOUT_DEPTH: u8 = 4;

/// How a leaf is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollout {
    /// Uniform-random moves until the game ends or is adjudicated
    Random,
    /// Fixed-depth alpha-beta score through a logistic curve
    AlphaBeta { depth: u8 },
}

/// Logistic map from a centipawn score to a win probability.
pub fn win_probability(centipawns: i32) -> f64 {
    1.0 / (1.0 + (-(centipawns as f64) / SIGMOID_SCALE).exp())
}

/// Inverse of [`win_probability`], clamped to a finite range.
pub fn centipawns(probability: f64) -> i32 {
    let p = probability.clamp(0.001, 0.999);
    (SIGMOID_SCALE * (p / (1.0 - p)).ln()).round() as i32
}

/// Known results that a random playout would take forever to find.
///
/// A bare king facing a queen or rook, or facing exactly bishop and knight,
/// loses. Insufficient material and the fifty-move rule are draws.
pub fn adjudicate(pos: &Position) -> Option<f64> {
    for lone in Color::ALL {
        let strong = lone.other();
        if pos.occupancy(lone).popcount() != 1 {
            continue;
        }
        let heavy = pos.pieces(strong, PieceKind::Queen) | pos.pieces(strong, PieceKind::Rook);
        let bishop_knight = pos.occupancy(strong).popcount() == 3
            && !pos.pieces(strong, PieceKind::Bishop).is_empty()
            && !pos.pieces(strong, PieceKind::Knight).is_empty();
        if !heavy.is_empty() || bishop_knight {
            return Some(if pos.side_to_move == lone { LOSS } else { WIN });
        }
    }
    if pos.is_insufficient_material() || pos.is_fifty_move_draw() {
        return Some(DRAW);
    }
    None
}

/// Plays uniformly random legal moves from `pos` until mate, stalemate,
/// adjudication or `max_plies`, which counts as a draw.
pub fn random_rollout<R: Rng + ?Sized>(
    pos: &Position,
    gen: &MoveGenerator,
    rng: &mut R,
    max_plies: u32,
) -> f64 {
    let mut current = pos.clone();
    let mut moves = Vec::with_capacity(64);
    // true when the side to move in `current` is the opponent of the side
    // to move in `pos`
    let mut flipped = false;

    for _ in 0..max_plies {
        gen.generate_into(&current, false, &mut moves);
        let result = if moves.is_empty() {
            Some(if gen.is_in_check(&current) { LOSS } else { DRAW })
        } else {
            adjudicate(&current)
        };
        if let Some(value) = result {
            return if flipped { 1.0 - value } else { value };
        }

        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        current.apply_move(mv);
        flipped = !flipped;
    }
    DRAW
}

/// Scores `pos` with a `depth`-ply alpha-beta search (plus quiescence) and
/// maps the result to a win probability. `depth` is capped at
/// [`MAX_ROLLOUT_DEPTH`].
pub fn alpha_beta_rollout(pos: &Position, tt: &mut TranspositionTable, depth: u8) -> f64 {
    let unlimited = TimeControl::new(None);
    unlimited.start();
    let mut searcher = Searcher::new(tt, &unlimited, &[]);
    win_probability(searcher.evaluate_to_depth(pos, depth.min(MAX_ROLLOUT_DEPTH)))
}

#[cfg(test)]
#[path = "rollout_tests.rs"]
mod rollout_tests;
