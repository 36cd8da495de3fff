//! Material evaluation with a mop-up term for won endgames.

use chess_core::{king_distance, Color, PieceKind, Position};

/// Non-pawn material at which the endgame weight starts to rise above zero:
/// two rooks, a bishop and a knight.
const ENDGAME_MATERIAL_START: i32 = 2 * 500 + 330 + 320;

/// Evaluates the position from the side-to-move's perspective.
///
/// Returns a score in centipawns:
/// - Positive = good for side to move
/// - Negative = bad for side to move
/// - 0 = equal position
pub fn evaluate(pos: &Position) -> i32 {
    let white_material = pos.material(Color::White);
    let black_material = pos.material(Color::Black);

    let mut score = white_material - black_material;
    score += mop_up(pos, Color::White, white_material, black_material);
    score -= mop_up(pos, Color::Black, black_material, white_material);

    if pos.side_to_move == Color::White {
        score
    } else {
        -score
    }
}

/// 0.0 while `opponent` keeps at least [`ENDGAME_MATERIAL_START`] in pieces,
/// rising linearly to 1.0 once only pawns and the king remain.
pub fn endgame_weight(pos: &Position, opponent: Color) -> f32 {
    let remaining = pos.non_pawn_material(opponent).min(ENDGAME_MATERIAL_START);
    1.0 - remaining as f32 / ENDGAME_MATERIAL_START as f32
}

/// Bonus for `us` when clearly ahead: the enemy king far from the centre
/// and our king close to it. Without this, a bare-king ending looks flat to
/// a shallow search and the stronger side wanders.
fn mop_up(pos: &Position, us: Color, ours: i32, theirs: i32) -> i32 {
    if ours < theirs + 2 * PieceKind::Pawn.value() {
        return 0;
    }
    let weight = endgame_weight(pos, us.other());
    if weight <= 0.0 {
        return 0;
    }

    let our_king = pos.king_square(us);
    let their_king = pos.king_square(us.other());

    let mut bonus = centre_distance(their_king) * 10;
    bonus += (7 - king_distance(our_king, their_king)) * 4;
    (bonus as f32 * weight) as i32
}

/// Manhattan distance from the four centre squares, 0..=6.
fn centre_distance(sq: u8) -> i32 {
    let file = (sq % 8) as i32;
    let rank = (sq / 8) as i32;
    (3 - file).max(file - 4) + (3 - rank).max(rank - 4)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
