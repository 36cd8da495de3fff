//! Forsyth-Edwards Notation reader and writer.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::board::Position;
use crate::error::{FenError, FenResult};
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Largest half-move clock or full-move number accepted from FEN.
pub const MAX_MOVE_COUNTER: u32 = 100_000;

impl Position {
    /// Parses a FEN string. The two move counters are optional and default
    /// to `0 1`.
    ///
    /// Castling rights whose king or rook is not on its home square are
    /// dropped rather than rejected. An en-passant square must sit behind an
    /// enemy pawn that could just have made a double push, and counters
    /// above [`MAX_MOVE_COUNTER`] are rejected.
    pub fn from_fen(fen: &str) -> FenResult<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::FieldCount(parts.len()));
        }

        let mut pos = Position::empty();
        parse_placement(&mut pos, parts[0])?;

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                let castle = match c {
                    'K' => Castling::WhiteKingside,
                    'Q' => Castling::WhiteQueenside,
                    'k' => Castling::BlackKingside,
                    'q' => Castling::BlackQueenside,
                    _ => return Err(FenError::InvalidCastling(c)),
                };
                if castling_pieces_home(&pos, castle) {
                    pos.castling.insert(castle);
                }
            }
        }

        if parts[3] != "-" {
            let sq = coord_to_sq(parts[3])
                .filter(|&sq| is_plausible_en_passant(&pos, sq))
                .ok_or_else(|| FenError::InvalidEnPassant(parts[3].to_string()))?;
            pos.en_passant = Bitboard::from_square(sq);
        }

        if let Some(text) = parts.get(4) {
            pos.halfmove_clock = parse_counter(text)?;
        }
        if let Some(text) = parts.get(5) {
            pos.fullmove_number = parse_counter(text)?;
        }

        for color in Color::ALL {
            let count = pos.pieces(color, PieceKind::King).popcount();
            if count != 1 {
                return Err(FenError::KingCount { color, count });
            }
        }

        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(rank * 8 + file) {
                    Some(p) => {
                        if empty > 0 {
                            let _ = write!(out, "{empty}");
                            empty = 0;
                        }
                        out.push(p.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(out, "{empty}");
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        if self.castling.is_empty() {
            out.push('-');
        } else {
            for c in self.castling.iter() {
                out.push(match c {
                    Castling::WhiteKingside => 'K',
                    Castling::WhiteQueenside => 'Q',
                    Castling::BlackKingside => 'k',
                    Castling::BlackQueenside => 'q',
                });
            }
        }

        out.push(' ');
        match self.en_passant_square() {
            Some(sq) => out.push_str(&sq_to_coord(sq)),
            None => out.push('-'),
        }

        let _ = write!(out, " {} {}", self.halfmove_clock, self.fullmove_number);
        out
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

fn parse_placement(pos: &mut Position, placement: &str) -> FenResult<()> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    // FEN lists rank 8 first
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as u8;
        let width_error = || FenError::RankWidth {
            rank: rank + 1,
            text: rank_str.to_string(),
        };
        let mut file = 0u8;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                if d == 0 {
                    return Err(width_error());
                }
                file += d as u8;
            } else {
                let kind = PieceKind::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if file >= 8 {
                    return Err(width_error());
                }
                pos.put_piece(rank * 8 + file, Piece::new(color, kind));
                file += 1;
            }
            if file > 8 {
                return Err(width_error());
            }
        }
        if file != 8 {
            return Err(width_error());
        }
    }
    Ok(())
}

fn parse_counter(text: &str) -> FenResult<u32> {
    text.parse()
        .ok()
        .filter(|&n| n <= MAX_MOVE_COUNTER)
        .ok_or_else(|| FenError::InvalidCounter(text.to_string()))
}

/// `sq` is the square a pawn of the side not to move just skipped: it and
/// the pawn's start square are empty and the pawn stands in front of it.
fn is_plausible_en_passant(pos: &Position, sq: u8) -> bool {
    let (target_rank, pawn_sq, start_sq) = match pos.side_to_move {
        Color::White => (Bitboard::RANK_6, sq.wrapping_sub(8), sq + 8),
        Color::Black => (Bitboard::RANK_3, sq + 8, sq.wrapping_sub(8)),
    };
    let them = pos.side_to_move.other();
    target_rank.contains(sq)
        && pos.piece_at(sq).is_none()
        && pos.piece_at(start_sq).is_none()
        && pos.piece_at(pawn_sq) == Some(Piece::new(them, PieceKind::Pawn))
}

fn castling_pieces_home(pos: &Position, castle: Castling) -> bool {
    let color = castle.color();
    let (king_from, _) = castle.king_squares();
    let (rook_from, _) = castle.rook_squares();
    pos.piece_at(king_from) == Some(Piece::new(color, PieceKind::King))
        && pos.piece_at(rook_from) == Some(Piece::new(color, PieceKind::Rook))
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
