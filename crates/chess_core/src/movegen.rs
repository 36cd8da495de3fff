//! Legal move generation.
//!
//! Moves are produced legal by construction: check evasions are restricted
//! to capturing or blocking the checker, king steps avoid every attacked
//! square, and pinned pieces stay on their pin ray. En passant, the one move
//! that can expose the king along a rank, is verified on a hypothetical
//! board. Nothing is generated and then filtered.

use crate::attacks::AttackTables;
use crate::bitboard::Bitboard;
use crate::board::Position;
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    MoveGenerator::global().generate(pos, false)
}

/// Legal move generator over a set of precomputed attack tables.
#[derive(Clone, Copy)]
pub struct MoveGenerator<'a> {
    tables: &'a AttackTables,
}

impl MoveGenerator<'static> {
    /// Generator over [`AttackTables::global`].
    pub fn global() -> Self {
        MoveGenerator::new(AttackTables::global())
    }
}

impl<'a> MoveGenerator<'a> {
    pub fn new(tables: &'a AttackTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a AttackTables {
        self.tables
    }

    /// Pieces of color `by` attacking `sq`, with sliders seeing through
    /// `occupied` and anything in `ignore` treated as gone.
    ///
    /// Each piece kind is placed on `sq` in turn; whatever it could capture
    /// of the same kind attacks back.
    pub fn attackers_to(
        &self,
        pos: &Position,
        sq: u8,
        by: Color,
        occupied: Bitboard,
        ignore: Bitboard,
    ) -> Bitboard {
        let t = self.tables;
        let of = |kind| pos.pieces(by, kind) - ignore;
        let queens = of(PieceKind::Queen);

        (t.pawn(by.other(), sq) & of(PieceKind::Pawn))
            | (t.knight(sq) & of(PieceKind::Knight))
            | (t.king(sq) & of(PieceKind::King))
            | (t.bishop_attacks(sq, occupied) & (of(PieceKind::Bishop) | queens))
            | (t.rook_attacks(sq, occupied) & (of(PieceKind::Rook) | queens))
    }

    /// Enemy pieces giving check to the side to move.
    pub fn checkers(&self, pos: &Position) -> Bitboard {
        let us = pos.side_to_move;
        self.attackers_to(
            pos,
            pos.king_square(us),
            us.other(),
            pos.occupied(),
            Bitboard::EMPTY,
        )
    }

    pub fn is_in_check(&self, pos: &Position) -> bool {
        !self.checkers(pos).is_empty()
    }

    /// Every square the enemy attacks, computed with the mover's king lifted
    /// off the board so it cannot step back along a checking ray.
    pub fn danger_squares(&self, pos: &Position) -> Bitboard {
        let t = self.tables;
        let us = pos.side_to_move;
        let them = us.other();
        let occ = pos.occupied() - pos.pieces(us, PieceKind::King);

        let pawns = pos.pieces(them, PieceKind::Pawn);
        let mut danger = match them {
            Color::White => pawns.north_east() | pawns.north_west(),
            Color::Black => pawns.south_east() | pawns.south_west(),
        };
        for sq in pos.pieces(them, PieceKind::Knight) {
            danger |= t.knight(sq);
        }
        for sq in pos.pieces(them, PieceKind::King) {
            danger |= t.king(sq);
        }
        let queens = pos.pieces(them, PieceKind::Queen);
        for sq in pos.pieces(them, PieceKind::Bishop) | queens {
            danger |= t.bishop_attacks(sq, occ);
        }
        for sq in pos.pieces(them, PieceKind::Rook) | queens {
            danger |= t.rook_attacks(sq, occ);
        }
        danger
    }

    pub fn generate(&self, pos: &Position, captures_only: bool) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        self.generate_into(pos, captures_only, &mut out);
        out
    }

    /// Fills `out` with the legal moves of the side to move. With
    /// `captures_only`, only moves that take a piece are produced.
    pub fn generate_into(&self, pos: &Position, captures_only: bool, out: &mut Vec<Move>) {
        out.clear();
        let t = self.tables;
        let us = pos.side_to_move;
        let them = us.other();
        let own = pos.occupancy(us);
        let enemy = pos.occupancy(them);
        let occ = pos.occupied();
        let king = pos.king_square(us);

        let checkers = self.checkers(pos);
        let danger = self.danger_squares(pos);
        let targets = if captures_only { enemy } else { !own };

        let king_piece = Piece::new(us, PieceKind::King);
        for to in t.king(king) & targets - danger {
            out.push(Move::new(king, to, king_piece));
        }

        // Double check: only the king may move.
        if checkers.more_than_one() {
            return;
        }

        let check_mask = match checkers.lsb() {
            Some(checker) => Bitboard::from_square(checker) | t.between(king, checker),
            None => Bitboard::ALL,
        };

        if checkers.is_empty() && !captures_only {
            self.castling_moves(pos, danger, out);
        }

        let (pinned, pin_rays) = self.pins(pos, king);
        let allowed = |from: u8| {
            if pinned.contains(from) {
                check_mask & pin_rays[from as usize]
            } else {
                check_mask
            }
        };

        self.pawn_moves(pos, captures_only, &allowed, out);

        let knight = Piece::new(us, PieceKind::Knight);
        // A pinned knight can never stay on its ray.
        for from in pos.pieces(us, PieceKind::Knight) - pinned {
            for to in t.knight(from) & targets & check_mask {
                out.push(Move::new(from, to, knight));
            }
        }

        for kind in [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
            let piece = Piece::new(us, kind);
            for from in pos.pieces(us, kind) {
                let attacks = match kind {
                    PieceKind::Bishop => t.bishop_attacks(from, occ),
                    PieceKind::Rook => t.rook_attacks(from, occ),
                    _ => t.queen_attacks(from, occ),
                };
                for to in attacks & targets & allowed(from) {
                    out.push(Move::new(from, to, piece));
                }
            }
        }
    }

    /// Pinned pieces of the side to move and, per pinned square, the ray it
    /// may still move along (the squares up to and including the pinner).
    fn pins(&self, pos: &Position, king: u8) -> (Bitboard, [Bitboard; 64]) {
        let t = self.tables;
        let us = pos.side_to_move;
        let them = us.other();
        let occ = pos.occupied();
        let queens = pos.pieces(them, PieceKind::Queen);

        let snipers = (t.rook_attacks(king, Bitboard::EMPTY)
            & (pos.pieces(them, PieceKind::Rook) | queens))
            | (t.bishop_attacks(king, Bitboard::EMPTY)
                & (pos.pieces(them, PieceKind::Bishop) | queens));

        let mut pinned = Bitboard::EMPTY;
        let mut rays = [Bitboard::ALL; 64];
        for sniper in snipers {
            let between = t.between(king, sniper);
            let blockers = between & occ;
            if blockers.popcount() == 1 && !(blockers & pos.occupancy(us)).is_empty() {
                if let Some(sq) = blockers.lsb() {
                    pinned.set(sq);
                    rays[sq as usize] = between | Bitboard::from_square(sniper);
                }
            }
        }
        (pinned, rays)
    }

    fn pawn_moves(
        &self,
        pos: &Position,
        captures_only: bool,
        allowed: &dyn Fn(u8) -> Bitboard,
        out: &mut Vec<Move>,
    ) {
        let t = self.tables;
        let us = pos.side_to_move;
        let enemy = pos.occupancy(us.other());
        let occ = pos.occupied();
        let pawn = Piece::new(us, PieceKind::Pawn);
        let (start_rank, forward) = match us {
            Color::White => (Bitboard::RANK_2, 8i8),
            Color::Black => (Bitboard::RANK_7, -8i8),
        };

        for from in pos.pieces(us, PieceKind::Pawn) {
            let mask = allowed(from);

            if !captures_only {
                let one = (from as i8 + forward) as u8;
                if !occ.contains(one) {
                    if mask.contains(one) {
                        push_pawn_move(from, one, pawn, out);
                    }
                    let two = (one as i8 + forward) as u8;
                    if start_rank.contains(from) && !occ.contains(two) && mask.contains(two) {
                        out.push(Move::new(from, two, pawn));
                    }
                }
            }

            for to in t.pawn(us, from) & enemy & mask {
                push_pawn_move(from, to, pawn, out);
            }

            if let Some(ep) = pos.en_passant_square() {
                if t.pawn(us, from).contains(ep) {
                    let mv = Move::en_passant(from, ep, us);
                    if self.en_passant_is_safe(pos, mv) {
                        out.push(mv);
                    }
                }
            }
        }
    }

    /// Plays the capture on a hypothetical occupancy (both pawns lifted,
    /// the capturer dropped on the target) and looks for checkers.
    fn en_passant_is_safe(&self, pos: &Position, mv: Move) -> bool {
        let us = pos.side_to_move;
        let victim = Bitboard::from_square(mv.en_passant_victim());
        let occ = (pos.occupied() - Bitboard::from_square(mv.from) - victim)
            | Bitboard::from_square(mv.to);
        self.attackers_to(pos, pos.king_square(us), us.other(), occ, victim)
            .is_empty()
    }

    fn castling_moves(&self, pos: &Position, danger: Bitboard, out: &mut Vec<Move>) {
        let t = self.tables;
        let us = pos.side_to_move;
        let occ = pos.occupied();
        for castle in pos.castling.iter().filter(|c| c.color() == us) {
            let (king_from, king_to) = castle.king_squares();
            let (rook_from, _) = castle.rook_squares();
            // b1/b8 must be empty but may be attacked
            let must_be_empty = t.between(king_from, rook_from);
            let king_path = t.between(king_from, king_to) | Bitboard::from_square(king_to);
            if (must_be_empty & occ).is_empty() && (king_path & danger).is_empty() {
                out.push(Move::castling(castle));
            }
        }
    }

    /// Mate, stalemate and the board-only draws (fifty moves, insufficient
    /// material). Repetition needs game history and is left to the caller.
    pub fn status(&self, pos: &Position) -> GameStatus {
        let mut moves = Vec::with_capacity(64);
        self.generate_into(pos, false, &mut moves);
        if moves.is_empty() {
            if self.is_in_check(pos) {
                GameStatus::Checkmate
            } else {
                GameStatus::Draw(DrawReason::Stalemate)
            }
        } else if pos.is_fifty_move_draw() {
            GameStatus::Draw(DrawReason::FiftyMoveRule)
        } else if pos.is_insufficient_material() {
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        } else {
            GameStatus::Ongoing
        }
    }
}

/// Pushes a pawn move, expanding it into the four promotions on the last
/// rank.
#[inline(always)]
fn push_pawn_move(from: u8, to: u8, pawn: Piece, out: &mut Vec<Move>) {
    if (Bitboard::RANK_1 | Bitboard::RANK_8).contains(to) {
        for kind in PieceKind::PROMOTIONS.iter().rev() {
            out.push(Move::promotion(from, to, pawn, *kind));
        }
    } else {
        out.push(Move::new(from, to, pawn));
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
