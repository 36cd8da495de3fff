//! Board state: piece bitboards mirrored by a square array, plus the
//! castling, en-passant and move-counter state needed to play a game.

use crate::bitboard::Bitboard;
use crate::types::*;
use crate::zobrist::ZOBRIST;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// One bitboard per piece, indexed by `Piece::index()`.
    pieces: [Bitboard; 12],
    /// Union of `pieces` per color, indexed by `Color::idx()`.
    colors: [Bitboard; 2],
    board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square passed over by a pawn that just advanced two; at most one bit.
    pub en_passant: Bitboard,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// State `apply_move` destroys and `undo_move` needs back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub en_passant: Bitboard,
    pub halfmove_clock: u32,
    pub revoked: CastlingRights,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// A board with no pieces, white to move, no rights.
    pub(crate) fn empty() -> Self {
        Position {
            pieces: [Bitboard::EMPTY; 12],
            colors: [Bitboard::EMPTY; 2],
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: Bitboard::EMPTY,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        for f in 0..8u8 {
            p.put_piece(8 + f, Piece::new(Color::White, PieceKind::Pawn));
            p.put_piece(48 + f, Piece::new(Color::Black, PieceKind::Pawn));
            p.put_piece(f, Piece::new(Color::White, BACK_RANK[f as usize]));
            p.put_piece(56 + f, Piece::new(Color::Black, BACK_RANK[f as usize]));
        }
        p.castling = CastlingRights::ALL;
        p
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline(always)]
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    #[inline(always)]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[Piece::new(color, kind).index()]
    }

    #[inline(always)]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.colors[color.idx()]
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// Square of `color`'s king. Every constructed position has exactly one.
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> u8 {
        let king = self.pieces(color, PieceKind::King);
        debug_assert_eq!(king.popcount(), 1, "{color:?} must have one king");
        king.lsb().unwrap_or(0)
    }

    pub fn en_passant_square(&self) -> Option<u8> {
        self.en_passant.lsb()
    }

    /// Piece `mv` would remove from the board, if any.
    pub fn captured_piece(&self, mv: Move) -> Option<Piece> {
        if mv.is_en_passant {
            self.piece_at(mv.en_passant_victim())
        } else {
            self.piece_at(mv.to)
        }
    }

    #[inline(always)]
    pub fn is_capture(&self, mv: Move) -> bool {
        mv.is_en_passant || self.board[mv.to as usize].is_some()
    }

    /// Sum of knight, bishop, rook and queen values for `color`.
    pub fn non_pawn_material(&self, color: Color) -> i32 {
        [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen]
            .iter()
            .map(|&k| self.pieces(color, k).popcount() as i32 * k.value())
            .sum()
    }

    /// Material for `color` in centipawns, pawns included.
    pub fn material(&self, color: Color) -> i32 {
        self.non_pawn_material(color)
            + self.pieces(color, PieceKind::Pawn).popcount() as i32 * PieceKind::Pawn.value()
    }

    /// Check if the position is a draw by the fifty-move rule.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly deliver mate: bare kings, a single minor
    /// piece, or only bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let heavy_or_pawns = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen]
            .iter()
            .any(|&k| !(self.pieces(Color::White, k) | self.pieces(Color::Black, k)).is_empty());
        if heavy_or_pawns {
            return false;
        }

        let knights =
            self.pieces(Color::White, PieceKind::Knight) | self.pieces(Color::Black, PieceKind::Knight);
        let bishops =
            self.pieces(Color::White, PieceKind::Bishop) | self.pieces(Color::Black, PieceKind::Bishop);
        let minors = knights | bishops;

        if minors.popcount() <= 1 {
            return true;
        }
        knights.is_empty()
            && ((bishops & Bitboard::LIGHT_SQUARES).is_empty()
                || (bishops - Bitboard::LIGHT_SQUARES).is_empty())
    }

    /// Full Zobrist recomputation. Move counters do not contribute.
    pub fn zobrist_hash(&self) -> u64 {
        let mut hash = 0u64;
        for (sq, piece) in self.board.iter().enumerate() {
            if let Some(p) = piece {
                hash ^= ZOBRIST.piece_key(*p, sq as u8);
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side_to_move;
        }
        for c in self.castling.iter() {
            hash ^= ZOBRIST.castling_key(c);
        }
        if let Some(ep) = self.en_passant_square() {
            hash ^= ZOBRIST.ep_key(ep % 8);
        }
        hash
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    #[inline(always)]
    pub(crate) fn put_piece(&mut self, sq: u8, piece: Piece) {
        self.pieces[piece.index()].set(sq);
        self.colors[piece.color.idx()].set(sq);
        self.board[sq as usize] = Some(piece);
    }

    #[inline(always)]
    pub(crate) fn remove_piece(&mut self, sq: u8) -> Option<Piece> {
        let piece = self.board[sq as usize].take()?;
        self.pieces[piece.index()].clear(sq);
        self.colors[piece.color.idx()].clear(sq);
        Some(piece)
    }

    /// Plays a legal move and returns the castling rights it revoked.
    ///
    /// Rights are lost when the king moves, or when anything leaves or lands
    /// on a rook's home square.
    pub fn apply_move(&mut self, mv: Move) -> CastlingRights {
        let us = mv.piece.color;

        let captured = if mv.is_en_passant {
            self.remove_piece(mv.en_passant_victim())
        } else {
            self.remove_piece(mv.to)
        };

        self.remove_piece(mv.from);
        let placed = match mv.promo {
            Some(kind) => Piece::new(us, kind),
            None => mv.piece,
        };
        self.put_piece(mv.to, placed);

        if let Some(castle) = mv.castle {
            let (rook_from, rook_to) = castle.rook_squares();
            if let Some(rook) = self.remove_piece(rook_from) {
                self.put_piece(rook_to, rook);
            }
        }

        self.en_passant = Bitboard::EMPTY;
        let is_pawn = mv.piece.kind == PieceKind::Pawn;
        if is_pawn && mv.from.abs_diff(mv.to) == 16 {
            self.en_passant = Bitboard::from_square((mv.from + mv.to) / 2);
        }

        let mut lost = CastlingRights::NONE;
        if mv.piece.kind == PieceKind::King {
            lost = lost.union(CastlingRights::for_color(us));
        }
        for sq in [mv.from, mv.to] {
            if let Some(c) = Castling::for_rook_home(sq) {
                lost = lost.union(c.right());
            }
        }
        let revoked = self.castling.remove(lost);

        if is_pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = us.other();

        revoked
    }

    /// Exact inverse of [`apply_move`](Self::apply_move).
    pub fn undo_move(
        &mut self,
        mv: Move,
        captured: Option<Piece>,
        prev_en_passant: Bitboard,
        prev_halfmove: u32,
        revoked: CastlingRights,
    ) {
        let us = mv.piece.color;
        self.side_to_move = us;
        if us == Color::Black {
            self.fullmove_number -= 1;
        }
        self.castling = self.castling.union(revoked);
        self.en_passant = prev_en_passant;
        self.halfmove_clock = prev_halfmove;

        if let Some(castle) = mv.castle {
            let (rook_from, rook_to) = castle.rook_squares();
            if let Some(rook) = self.remove_piece(rook_to) {
                self.put_piece(rook_from, rook);
            }
        }

        self.remove_piece(mv.to);
        self.put_piece(mv.from, mv.piece);

        if let Some(piece) = captured {
            let sq = if mv.is_en_passant {
                mv.en_passant_victim()
            } else {
                mv.to
            };
            self.put_piece(sq, piece);
        }
    }

    /// [`apply_move`](Self::apply_move) that records what undoing needs.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let captured = self.captured_piece(mv);
        let en_passant = self.en_passant;
        let halfmove_clock = self.halfmove_clock;
        let revoked = self.apply_move(mv);
        Undo {
            captured,
            en_passant,
            halfmove_clock,
            revoked,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.undo_move(
            mv,
            undo.captured,
            undo.en_passant,
            undo.halfmove_clock,
            undo.revoked,
        );
    }

    /// Bitboards agree with the square array and colors are disjoint.
    pub fn is_consistent(&self) -> bool {
        let mut colors = [Bitboard::EMPTY; 2];
        for (idx, bb) in self.pieces.iter().enumerate() {
            for sq in *bb {
                match self.board[sq as usize] {
                    Some(p) if p.index() == idx => colors[p.color.idx()].set(sq),
                    _ => return false,
                }
            }
        }
        let listed = self.board.iter().filter(|p| p.is_some()).count() as u32;
        colors == self.colors
            && (colors[0] & colors[1]).is_empty()
            && (colors[0] | colors[1]).popcount() == listed
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
