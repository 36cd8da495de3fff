//! UCI long-algebraic move text.

use crate::{board::Position, movegen::MoveGenerator, types::*};

/// `e2e4`, `e7e8q`; castling is the king's two-square step (`e1g1`).
pub fn move_to_uci(mv: Move) -> String {
    mv.to_string()
}

/// Resolves `txt` against the legal moves of `pos`, so the castling and
/// en-passant flags of the result are exact. Returns `None` for malformed
/// or illegal text. A promotion without a suffix is read as a queen.
pub fn parse_uci_move(pos: &Position, gen: &MoveGenerator, txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.chars().nth(4) {
        Some(c) => match PieceKind::from_char(c)? {
            PieceKind::Pawn | PieceKind::King => return None,
            kind => Some(kind),
        },
        None => None,
    };

    gen.generate(pos, false).into_iter().find(|m| {
        m.from == from
            && m.to == to
            && match m.promo {
                Some(kind) => kind == promo.unwrap_or(PieceKind::Queen),
                None => promo.is_none(),
            }
    })
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
