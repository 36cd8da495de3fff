//! Zobrist hashing for chess positions.
//!
//! The hash is the XOR of random keys for:
//! - Each piece on each square (12 pieces × 64 squares = 768 values)
//! - Side to move (1 value, present when black is to move)
//! - Castling rights (4 values)
//! - En passant file (8 values)
//!
//! [`Position::zobrist_hash`](crate::Position::zobrist_hash) recomputes it
//! from scratch; [`update`] toggles only what a move changes, so search can
//! carry the hash down the tree in O(1) per move.

use crate::bitboard::Bitboard;
use crate::board::Position;
use crate::types::{Castling, CastlingRights, Move, Piece, PieceKind};

/// Random keys generated at compile time from a fixed seed.
pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XOR-ed in when black is to move
    pub side_to_move: u64,
    /// Indexed by `Castling::idx()`
    pub castling: [u64; 4],
    /// One per file of the en-passant square
    pub en_passant: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// xorshift64 stream from a fixed seed, so hashes are stable across runs.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x123456789ABCDEF0u64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut piece = 0;
            while piece < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][piece][sq] = state;
                    sq += 1;
                }
                piece += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    #[inline(always)]
    pub fn castling_key(&self, castle: Castling) -> u64 {
        self.castling[castle.idx()]
    }

    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Hash of the position reached by playing `mv` from `before`, given the
/// old hash, the castling rights the move revoked and the en-passant set it
/// left behind.
///
/// Every component is toggled by XOR, so calling this twice with the same
/// arguments returns the original hash.
pub fn update(
    hash: u64,
    before: &Position,
    mv: Move,
    revoked: CastlingRights,
    after_ep: Bitboard,
) -> u64 {
    let mut h = hash ^ ZOBRIST.side_to_move;

    h ^= ZOBRIST.piece_key(mv.piece, mv.from);
    let placed = match mv.promo {
        Some(kind) => Piece::new(mv.piece.color, kind),
        None => mv.piece,
    };
    h ^= ZOBRIST.piece_key(placed, mv.to);

    if let Some(captured) = before.captured_piece(mv) {
        let sq = if mv.is_en_passant {
            mv.en_passant_victim()
        } else {
            mv.to
        };
        h ^= ZOBRIST.piece_key(captured, sq);
    }

    if let Some(castle) = mv.castle {
        let rook = Piece::new(mv.piece.color, PieceKind::Rook);
        let (rook_from, rook_to) = castle.rook_squares();
        h ^= ZOBRIST.piece_key(rook, rook_from) ^ ZOBRIST.piece_key(rook, rook_to);
    }

    for c in revoked.iter() {
        h ^= ZOBRIST.castling_key(c);
    }

    if let Some(sq) = before.en_passant.lsb() {
        h ^= ZOBRIST.ep_key(sq % 8);
    }
    if let Some(sq) = after_ep.lsb() {
        h ^= ZOBRIST.ep_key(sq % 8);
    }

    h
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
