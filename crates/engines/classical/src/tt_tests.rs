use super::*;

#[test]
fn test_probe_miss_on_empty_table() {
    let tt = TranspositionTable::new(16);
    assert!(tt.probe(12345).is_none());
    assert!(tt.is_empty());
}

#[test]
fn test_store_then_probe() {
    let mut tt = TranspositionTable::new(16);
    tt.store(42, 3, 150, Bound::Exact, None);

    let entry = tt.probe(42).expect("stored entry");
    assert_eq!(entry.depth, 3);
    assert_eq!(entry.value, 150);
    assert_eq!(entry.bound, Bound::Exact);
}

#[test]
fn test_colliding_key_is_rejected() {
    let mut tt = TranspositionTable::new(16);
    tt.store(5, 2, 10, Bound::Lower, None);
    // 21 % 16 == 5: same slot, different key
    assert!(tt.probe(21).is_none());
}

#[test]
fn test_last_write_wins() {
    let mut tt = TranspositionTable::new(16);
    tt.store(5, 8, 10, Bound::Exact, None);
    tt.store(21, 1, -30, Bound::Upper, None);

    assert!(tt.probe(5).is_none());
    assert_eq!(tt.probe(21).map(|e| e.value), Some(-30));
}

#[test]
fn test_best_move_is_kept() {
    let mv = chess_core::Move::new(
        12,
        28,
        chess_core::Piece::new(chess_core::Color::White, chess_core::PieceKind::Pawn),
    );
    let mut tt = TranspositionTable::new(8);
    tt.store(99, 4, 0, Bound::Lower, Some(mv));
    assert_eq!(tt.probe(99).and_then(|e| e.best_move), Some(mv));
}

#[test]
fn test_clear() {
    let mut tt = TranspositionTable::new(4);
    tt.store(1, 1, 1, Bound::Exact, None);
    tt.clear();
    assert!(tt.probe(1).is_none());
    assert_eq!(tt.len(), 4);
}

#[test]
fn test_zero_size_rounds_up() {
    let tt = TranspositionTable::new(0);
    assert_eq!(tt.len(), 1);
}
