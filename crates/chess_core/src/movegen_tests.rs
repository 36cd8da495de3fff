use super::*;

fn gen() -> MoveGenerator<'static> {
    MoveGenerator::global()
}

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn has_move(moves: &[Move], uci: &str) -> bool {
    moves.iter().any(|m| m.to_string() == uci)
}

#[test]
fn test_startpos_moves() {
    let moves = legal_moves(&Position::startpos());
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    let moves = legal_moves(&pos(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ));
    assert_eq!(moves.len(), 48);
    assert!(has_move(&moves, "e1g1"));
    assert!(has_move(&moves, "e1c1"));
}

#[test]
fn test_single_slider_check_allows_only_king_moves_and_capture() {
    // Rook on e8 checks the king on e1 down an open file; the bishop on a4
    // can take it, nothing can block.
    let p = pos("4r2k/8/8/8/B7/8/8/4K3 w - - 0 1");
    let moves = gen().generate(&p, false);
    assert_eq!(gen().checkers(&p), Bitboard::from_square(60));
    for mv in &moves {
        assert!(
            mv.piece.kind == PieceKind::King || mv.to == 60,
            "unexpected evasion {mv}"
        );
    }
    assert!(has_move(&moves, "a4e8"));
    // King cannot retreat along the checking ray
    assert!(!has_move(&moves, "e1e2"));
    assert!(has_move(&moves, "e1d1"));
}

#[test]
fn test_check_can_be_blocked() {
    let p = pos("4r2k/8/8/8/8/8/3B4/4K3 w - - 0 1");
    let moves = gen().generate(&p, false);
    assert!(has_move(&moves, "d2e3"));
    assert!(!has_move(&moves, "d2c3"));
}

#[test]
fn test_double_check_only_king_moves() {
    // Rook on e8 and bishop on b4 both check e1
    let p = pos("4r2k/8/8/8/1b6/8/8/4K2N w - - 0 1");
    assert_eq!(gen().checkers(&p).popcount(), 2);
    let moves = gen().generate(&p, false);
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|m| m.piece.kind == PieceKind::King));
}

#[test]
fn test_pinned_pieces() {
    // Knight on e2 pinned by rook on e8; bishop on d2 pinned diagonally by
    // the queen on a5 can only slide toward or capture it.
    let p = pos("4r2k/8/8/q7/8/8/3BN3/4K3 w - - 0 1");
    let moves = gen().generate(&p, false);
    assert!(moves.iter().all(|m| m.from != 12), "pinned knight moved");
    let bishop: Vec<_> = moves.iter().filter(|m| m.from == 11).collect();
    assert_eq!(bishop.len(), 3); // c3, b4, xa5
    assert!(has_move(&moves, "d2a5"));
}

#[test]
fn test_pinned_pawn_can_capture_along_pin() {
    // Pawn on f2 is pinned by the bishop on g3 and may only take it.
    let p = pos("7k/8/8/8/8/6b1/5P2/4K3 w - - 0 1");
    let moves = gen().generate(&p, false);
    assert!(has_move(&moves, "f2g3"));
    assert!(!has_move(&moves, "f2f3"));
    assert!(!has_move(&moves, "f2f4"));
}

#[test]
fn test_en_passant_discovered_check_on_rank_is_illegal() {
    // bxc6 would lift both pawns off the fifth rank, exposing the king on a5
    // to the rook on h5.
    let p = pos("8/8/8/KPp4r/8/8/8/7k w - c6 0 1");
    let moves = gen().generate(&p, false);
    assert!(!has_move(&moves, "b5c6"));
}

#[test]
fn test_en_passant_along_diagonal_pin_is_legal() {
    // Pawn e5 is pinned on the c3-g7 diagonal; capturing onto f6 stays on it.
    let p = pos("4k3/6b1/8/4Pp2/8/2K5/8/8 w - f6 0 1");
    let moves = gen().generate(&p, false);
    assert!(has_move(&moves, "e5f6"));
    assert!(!has_move(&moves, "e5e6"));
}

#[test]
fn test_en_passant_removes_checking_pawn() {
    // Black just played d7d5 giving check to the king on e4.
    let p = pos("4k3/8/8/3pP3/4K3/8/8/8 w - d6 0 1");
    assert!(gen().is_in_check(&p));
    let moves = gen().generate(&p, false);
    assert!(has_move(&moves, "e5d6"));
}

#[test]
fn test_castling_rules() {
    // Through check: f1 attacked by the rook on f8
    let p = pos("5r1k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let moves = gen().generate(&p, false);
    assert!(!has_move(&moves, "e1g1"));
    assert!(has_move(&moves, "e1c1"));

    // b1 attacked does not matter for queenside castling
    let p = pos("1r5k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(has_move(&gen().generate(&p, false), "e1c1"));

    // b1 occupied does
    let p = pos("7k/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
    assert!(!has_move(&gen().generate(&p, false), "e1c1"));

    // Never out of check
    let p = pos("4r2k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let moves = gen().generate(&p, false);
    assert!(!has_move(&moves, "e1g1"));
    assert!(!has_move(&moves, "e1c1"));
}

#[test]
fn test_promotions_expand_to_four_moves() {
    let p = pos("7k/P7/8/8/8/8/8/K7 w - - 0 1");
    let promos: Vec<_> = gen()
        .generate(&p, false)
        .into_iter()
        .filter(|m| m.from == 48)
        .collect();
    assert_eq!(promos.len(), 4);
    assert_eq!(promos[0].promo, Some(PieceKind::Queen));
}

#[test]
fn test_captures_only() {
    let p = pos("4k3/8/8/3p4/4P3/8/8/R3K3 w Q - 0 1");
    let captures = gen().generate(&p, true);
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].to_string(), "e4d5");
}

#[test]
fn test_king_cannot_capture_defended_piece() {
    let p = pos("4k3/8/8/8/8/5p2/4p3/4K3 w - - 0 1");
    let moves = gen().generate(&p, false);
    assert!(!has_move(&moves, "e1e2"));
}

#[test]
fn test_status() {
    assert_eq!(gen().status(&Position::startpos()), GameStatus::Ongoing);
    assert_eq!(
        gen().status(&pos("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1")),
        GameStatus::Draw(DrawReason::Stalemate)
    );
    assert_eq!(
        gen().status(&pos(
            "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4"
        )),
        GameStatus::Checkmate
    );
    assert_eq!(
        gen().status(&pos("8/8/8/4k3/8/4KB2/8/8 w - - 0 1")),
        GameStatus::Draw(DrawReason::InsufficientMaterial)
    );
    assert_eq!(
        gen().status(&pos("8/8/8/4k3/8/4K3/4P3/8 w - - 100 80")),
        GameStatus::Draw(DrawReason::FiftyMoveRule)
    );
}

#[test]
fn test_danger_squares_see_through_king() {
    // King on e2 in check from e8: e1 behind it is still covered.
    let p = pos("4r2k/8/8/8/8/8/4K3/8 w - - 0 1");
    let danger = gen().danger_squares(&p);
    assert!(danger.contains(4)); // e1
    assert!(!danger.contains(3)); // d1
    assert!(!has_move(&gen().generate(&p, false), "e2e1"));
}
