use super::*;

#[test]
fn test_move_to_uci() {
    let pawn = Piece::new(Color::White, PieceKind::Pawn);
    assert_eq!(move_to_uci(Move::new(12, 28, pawn)), "e2e4");
    assert_eq!(
        move_to_uci(Move::promotion(52, 60, pawn, PieceKind::Queen)),
        "e7e8q"
    );
    assert_eq!(move_to_uci(Move::castling(Castling::BlackQueenside)), "e8c8");
}

#[test]
fn test_parse_sets_castle_flag() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let gen = MoveGenerator::global();
    let mv = parse_uci_move(&pos, &gen, "e1g1").unwrap();
    assert_eq!(mv.castle, Some(Castling::WhiteKingside));
    let mv = parse_uci_move(&pos, &gen, "e1c1").unwrap();
    assert_eq!(mv.castle, Some(Castling::WhiteQueenside));
}

#[test]
fn test_parse_sets_en_passant_flag() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let mv = parse_uci_move(&pos, &MoveGenerator::global(), "e5d6").unwrap();
    assert!(mv.is_en_passant);
}

#[test]
fn test_parse_promotions() {
    let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let gen = MoveGenerator::global();
    assert_eq!(
        parse_uci_move(&pos, &gen, "a7a8n").unwrap().promo,
        Some(PieceKind::Knight)
    );
    assert_eq!(
        parse_uci_move(&pos, &gen, "a7a8").unwrap().promo,
        Some(PieceKind::Queen)
    );
    assert!(parse_uci_move(&pos, &gen, "a7a8k").is_none());
}

#[test]
fn test_parse_rejects_illegal_and_malformed() {
    let pos = Position::startpos();
    let gen = MoveGenerator::global();
    assert!(parse_uci_move(&pos, &gen, "e2e5").is_none());
    assert!(parse_uci_move(&pos, &gen, "e7e5").is_none());
    assert!(parse_uci_move(&pos, &gen, "e2").is_none());
    assert!(parse_uci_move(&pos, &gen, "z9e4").is_none());
    assert!(parse_uci_move(&pos, &gen, "e2e4").is_some());
}
