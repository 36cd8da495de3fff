use super::*;
use chess_core::{move_to_uci, START_FEN};

fn quick_config(mode: SearchMode) -> EngineConfig {
    EngineConfig {
        mode,
        move_time_ms: 100,
        tt_entries: 1 << 12,
        max_rollout_plies: 120,
        ..EngineConfig::default()
    }
}

#[test]
fn test_new_game_is_start_position() {
    let game = Game::new();
    assert_eq!(game.position(), &Position::startpos());
    assert_eq!(game.legal_moves().len(), 20);
    assert_eq!(game.status(), GameStatus::Ongoing);
    assert!(game.moves().is_empty());
}

#[test]
fn test_play_uci_moves() {
    let mut game = Game::new();
    let mv = game.play_uci("e2e4").expect("legal");
    assert_eq!(move_to_uci(mv), "e2e4");
    game.play_uci("e7e5").expect("legal");
    assert_eq!(game.moves().len(), 2);
    assert_eq!(
        game.position().to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
    );
}

#[test]
fn test_illegal_move_is_rejected() {
    let mut game = Game::new();
    let err = game.play_uci("e2e5").unwrap_err();
    assert!(matches!(err, GameError::IllegalMove(_)));
    // nothing changed
    assert_eq!(game.position(), &Position::startpos());
}

#[test]
fn test_garbage_move_text_is_rejected() {
    let mut game = Game::new();
    for text in ["", "e2", "e2e4qq", "z9e4", "e7e8k", "e2-e4"] {
        let err = game.play_uci(text).unwrap_err();
        assert!(matches!(err, GameError::InvalidMoveText(_)), "{text}");
    }
}

#[test]
fn test_play_rejects_move_from_other_position() {
    let mut game = Game::new();
    let other = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("valid FEN");
    let castle = chess_core::legal_moves(&other)
        .into_iter()
        .find(|m| m.castle.is_some())
        .expect("castling move");
    assert!(matches!(game.play(castle), Err(GameError::IllegalMove(_))));
}

#[test]
fn test_from_fen_and_errors() {
    let game = Game::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").expect("valid FEN");
    assert_eq!(game.position().side_to_move, chess_core::Color::Black);

    assert!(matches!(Game::from_fen("not a fen"), Err(GameError::Fen(_))));
}

#[test]
fn test_set_fen_and_new_game() {
    let mut game = Game::new();
    game.play_uci("g1f3").expect("legal");
    game.set_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("valid FEN");
    assert!(game.moves().is_empty());
    game.new_game();
    assert_eq!(game.position().to_fen(), START_FEN);
}

#[test]
fn test_fools_mate_is_checkmate() {
    let mut game = Game::new();
    for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        game.play_uci(mv).expect("legal");
    }
    assert_eq!(game.status(), GameStatus::Checkmate);
    assert!(game.legal_moves().is_empty());
}

#[test]
fn test_stalemate_status() {
    let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("valid FEN");
    assert_eq!(game.status(), GameStatus::Draw(DrawReason::Stalemate));
}

#[test]
fn test_threefold_repetition_by_knight_shuffle() {
    let mut game = Game::new();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    for mv in shuffle {
        game.play_uci(mv).expect("legal");
    }
    assert!(!game.is_threefold_repetition());
    for mv in shuffle {
        game.play_uci(mv).expect("legal");
    }
    assert!(game.is_threefold_repetition());
    assert_eq!(game.status(), GameStatus::Draw(DrawReason::Repetition));
}

#[test]
fn test_fifty_move_and_insufficient_material_status() {
    let fifty = Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 100 90").expect("valid FEN");
    assert_eq!(fifty.status(), GameStatus::Draw(DrawReason::FiftyMoveRule));

    let bare = Game::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").expect("valid FEN");
    assert_eq!(bare.status(), GameStatus::Draw(DrawReason::InsufficientMaterial));
}

#[test]
fn test_each_mode_returns_a_legal_move() {
    for mode in [SearchMode::Mcts, SearchMode::MctsAlphaBeta, SearchMode::AlphaBeta] {
        let mut game = Game::with_seed(quick_config(mode), 7);
        let mv = game
            .search(mode, Duration::from_millis(100))
            .expect("a move");
        assert!(game.legal_moves().contains(&mv), "{mode}");
    }
}

#[test]
fn test_search_default_uses_config() {
    let mut game = Game::with_seed(quick_config(SearchMode::AlphaBeta), 7);
    let mv = game.search_default().expect("a move");
    assert!(game.legal_moves().contains(&mv));

    game.set_mode(SearchMode::Mcts);
    game.set_move_time(Duration::from_millis(50));
    assert_eq!(game.config().mode, SearchMode::Mcts);
    assert_eq!(game.config().move_time_ms, 50);
}

#[test]
fn test_every_mode_finds_mate_in_one() {
    for mode in [SearchMode::Mcts, SearchMode::AlphaBeta] {
        let mut game = Game::from_fen_with_config(
            "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1",
            quick_config(mode),
        )
        .expect("valid FEN");
        let result = game.search_with_limits(mode, SearchLimits::iterations(3000));
        assert_eq!(
            result.best_move.map(move_to_uci).as_deref(),
            Some("e1e8"),
            "{mode}"
        );
    }
}

#[test]
fn test_search_on_finished_game_returns_none() {
    let mut game = Game::from_fen("R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1").expect("valid FEN");
    for mode in [SearchMode::Mcts, SearchMode::AlphaBeta] {
        assert!(game.search(mode, Duration::from_millis(20)).is_none());
    }
}

#[test]
fn test_playing_searched_move_keeps_tree() {
    let mut game = Game::with_seed(quick_config(SearchMode::Mcts), 3);
    let result = game.search_with_limits(SearchMode::Mcts, SearchLimits::iterations(400));
    let best = result.best_move.expect("a move");
    game.play(best).expect("legal");
    let tree = game.mcts.tree().expect("subtree kept");
    assert_eq!(tree.root().position, *game.position());
    assert!(tree.root().playouts > 0);
}

#[test]
fn test_uci_move_text_shape() {
    assert!(is_uci_move_text("e2e4"));
    assert!(is_uci_move_text("a7a8q"));
    assert!(is_uci_move_text("a7a8n"));
    assert!(!is_uci_move_text("a7a8p"));
    assert!(!is_uci_move_text("i2e4"));
    assert!(!is_uci_move_text("e2e4 "));
    assert!(!is_uci_move_text("é2e4"));
}
