//! Game-end rules as seen from `chess_core`: mate, stalemate, the fifty-move
//! rule, insufficient material, and the Zobrist keys repetition is built on.

use chess_core::zobrist;
use chess_core::{
    legal_moves, parse_uci_move, DrawReason, GameStatus, MoveGenerator, PieceKind, Position,
};

fn fen(s: &str) -> Position {
    Position::from_fen(s).expect("valid FEN")
}

fn status(s: &str) -> GameStatus {
    MoveGenerator::global().status(&fen(s))
}

/// Plays `moves` from `pos` and returns the key of every position reached,
/// starting with `pos` itself.
fn replay(pos: &mut Position, moves: &[&str]) -> Vec<u64> {
    let gen = MoveGenerator::global();
    let mut keys = vec![pos.zobrist_hash()];
    for text in moves {
        let mv = parse_uci_move(pos, &gen, text).expect("legal move");
        pos.apply_move(mv);
        keys.push(pos.zobrist_hash());
    }
    keys
}

// =============================================================================
// Mate and stalemate
// =============================================================================

#[test]
fn test_stalemates() {
    for s in [
        // queen covers every flight square of a cornered king
        "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1",
        // king and pawn against king
        "6k1/6P1/6K1/8/8/8/8/8 b - - 0 1",
    ] {
        assert_eq!(status(s), GameStatus::Draw(DrawReason::Stalemate), "{s}");
    }
}

#[test]
fn test_mate_and_plain_check() {
    let gen = MoveGenerator::global();

    let mated = fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert!(legal_moves(&mated).is_empty());
    assert!(gen.is_in_check(&mated));
    assert_eq!(gen.status(&mated), GameStatus::Checkmate);

    let checked = fen("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");
    assert!(gen.is_in_check(&checked));
    assert_eq!(gen.status(&checked), GameStatus::Ongoing);
}

#[test]
fn test_back_rank_mate_in_one() {
    let pos = fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    let gen = MoveGenerator::global();
    let mates: Vec<String> = legal_moves(&pos)
        .into_iter()
        .filter(|&mv| {
            let mut next = pos.clone();
            next.apply_move(mv);
            gen.status(&next) == GameStatus::Checkmate
        })
        .map(|mv| mv.to_string())
        .collect();
    assert_eq!(mates, vec!["e1e8".to_string()]);
}

// =============================================================================
// Precedence of outcomes
// =============================================================================

#[test]
fn test_mate_on_the_hundredth_halfmove_is_still_mate() {
    assert_eq!(
        status("4Q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 100 60"),
        GameStatus::Checkmate
    );
}

#[test]
fn test_stalemate_beats_fifty_move_rule() {
    assert_eq!(
        status("k7/2K5/1Q6/8/8/8/8/8 b - - 100 80"),
        GameStatus::Draw(DrawReason::Stalemate)
    );
}

#[test]
fn test_fifty_move_rule_beats_insufficient_material() {
    assert_eq!(
        status("8/8/8/4k3/8/4K3/8/8 w - - 100 60"),
        GameStatus::Draw(DrawReason::FiftyMoveRule)
    );
    assert_eq!(
        status("8/8/8/4k3/8/4K3/8/8 w - - 99 60"),
        GameStatus::Draw(DrawReason::InsufficientMaterial)
    );
}

#[test]
fn test_status_ignores_repetition() {
    // repetition needs game history, so a repeated board is still ongoing here
    let mut pos = Position::startpos();
    replay(
        &mut pos,
        &["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"],
    );
    assert_eq!(pos.zobrist_hash(), Position::startpos().zobrist_hash());
    assert_eq!(MoveGenerator::global().status(&pos), GameStatus::Ongoing);
}

// =============================================================================
// Fifty-move rule
// =============================================================================

#[test]
fn test_fifty_move_threshold() {
    assert!(fen("8/8/8/4k3/8/4K3/8/8 w - - 100 60").is_fifty_move_draw());
    assert!(!fen("8/8/8/4k3/8/4K3/8/8 w - - 99 60").is_fifty_move_draw());
}

#[test]
fn test_clock_resets_on_pawn_move_and_capture() {
    let mut pos = fen("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    let push = legal_moves(&pos)
        .into_iter()
        .find(|m| m.piece.kind == PieceKind::Pawn)
        .expect("pawn move available");
    pos.apply_move(push);
    assert_eq!(pos.halfmove_clock, 0);

    // Rxd5 captures the knight
    let mut pos = fen("4k3/8/8/3n4/8/8/8/3RK3 w - - 98 60");
    let gen = MoveGenerator::global();
    let capture = parse_uci_move(&pos, &gen, "d1d5").expect("legal capture");
    pos.apply_move(capture);
    assert_eq!(pos.halfmove_clock, 0);

    // quiet king move keeps counting, reaching the draw
    let mut pos = fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 60");
    let quiet = parse_uci_move(&pos, &gen, "e1f1").expect("legal king move");
    pos.apply_move(quiet);
    assert_eq!(pos.halfmove_clock, 100);
    assert_eq!(gen.status(&pos), GameStatus::Draw(DrawReason::FiftyMoveRule));
}

// =============================================================================
// Insufficient material
// =============================================================================

#[test]
fn test_insufficient_material_table() {
    let cases = [
        ("8/8/8/4k3/8/4K3/8/8 w - - 0 1", true),     // K v K
        ("8/8/8/4k3/8/4KB2/8/8 w - - 0 1", true),    // KB v K
        ("8/8/8/4k3/8/4KN2/8/8 w - - 0 1", true),    // KN v K
        ("8/8/4n3/4k3/8/4K3/8/8 w - - 0 1", true),   // K v KN
        ("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1", true), // bishops on one colour
        ("2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1", false), // bishops on both colours
        ("8/8/8/4k3/8/4K3/4P3/8 w - - 0 1", false),  // KP v K
        ("8/8/8/4k3/8/4K3/8/4R3 w - - 0 1", false),  // KR v K
        ("8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1", false), // KNN v K
        ("8/8/8/4k3/8/4K3/3BN3/8 w - - 0 1", false), // KBN v K
    ];
    for (s, drawn) in cases {
        assert_eq!(fen(s).is_insufficient_material(), drawn, "{s}");
    }
}

// =============================================================================
// Repetition keys
// =============================================================================

#[test]
fn test_keys_ignore_move_counters() {
    let a = fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let b = fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 6 5");
    assert_eq!(a.zobrist_hash(), b.zobrist_hash());
}

#[test]
fn test_keys_separate_side_castling_and_en_passant() {
    let base = fen(chess_core::START_FEN).zobrist_hash();
    for s in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1",
    ] {
        assert_ne!(fen(s).zobrist_hash(), base, "{s}");
    }

    let with_ep = fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    let without = fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
    assert_ne!(with_ep.zobrist_hash(), without.zobrist_hash());
}

#[test]
fn test_knight_shuffle_repeats_start_three_times() {
    let mut pos = Position::startpos();
    let keys = replay(
        &mut pos,
        &["g1f3", "g8f6", "f3g1", "f6g8", "b1c3", "b8c6", "c3b1", "c6b8"],
    );
    let start = keys[0];
    assert_eq!(keys.iter().filter(|&&k| k == start).count(), 3);
    // the positions in between never repeat the start
    assert!(keys[1..4].iter().all(|&k| k != start));
}

#[test]
fn test_incremental_keys_follow_a_repetition_cycle() {
    let gen = MoveGenerator::global();
    let mut pos = Position::startpos();
    let mut hash = pos.zobrist_hash();
    for text in ["e2e4", "e7e5", "g1f3", "b8c6", "f3g1", "c6b8", "g1f3"] {
        let mv = parse_uci_move(&pos, &gen, text).expect("legal move");
        let before = pos.clone();
        let revoked = pos.apply_move(mv);
        hash = zobrist::update(hash, &before, mv, revoked, pos.en_passant);
        assert_eq!(hash, pos.zobrist_hash(), "after {text}");
    }
}
