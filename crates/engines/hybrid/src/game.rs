//! Game facade: one position, its history, and both searches behind it.

use std::time::Duration;

use chess_core::{
    coord_to_sq, parse_uci_move, DrawReason, Engine, GameStatus, Move, MoveGenerator, PieceKind,
    Position, SearchLimits, SearchResult,
};
use classical_engine::ClassicalEngine;
use tracing::info;

use crate::config::{EngineConfig, SearchMode};
use crate::error::{GameError, GameResult};
use crate::mcts::{MctsEngine, MctsSettings};
use crate::rollout::Rollout;

/// A game in progress.
///
/// Moves go in through [`Game::play`] or [`Game::play_uci`], which also keep
/// the tree search's root in step with the board so statistics carry over
/// from one move to the next.
pub struct Game {
    position: Position,
    /// Zobrist keys of every position reached, current one last
    position_history: Vec<u64>,
    moves: Vec<Move>,
    config: EngineConfig,
    mcts: MctsEngine,
    alpha_beta: ClassicalEngine,
    gen: MoveGenerator<'static>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let mcts = MctsEngine::new(MctsSettings::from_config(&config), config.tt_entries);
        Self::assemble(Position::startpos(), config, mcts)
    }

    /// Game whose tree search draws from a fixed seed.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        let mcts =
            MctsEngine::with_seed(MctsSettings::from_config(&config), config.tt_entries, seed);
        Self::assemble(Position::startpos(), config, mcts)
    }

    pub fn from_fen(fen: &str) -> GameResult<Self> {
        Self::from_fen_with_config(fen, EngineConfig::default())
    }

    pub fn from_fen_with_config(fen: &str, config: EngineConfig) -> GameResult<Self> {
        let position = Position::from_fen(fen)?;
        let mut game = Self::with_config(config);
        game.reset_to(position);
        Ok(game)
    }

    fn assemble(position: Position, config: EngineConfig, mcts: MctsEngine) -> Self {
        let alpha_beta = ClassicalEngine::with_tt_entries(config.tt_entries);
        Self {
            position_history: vec![position.zobrist_hash()],
            position,
            moves: Vec::new(),
            config,
            mcts,
            alpha_beta,
            gen: MoveGenerator::global(),
        }
    }

    fn reset_to(&mut self, position: Position) {
        self.position_history = vec![position.zobrist_hash()];
        self.position = position;
        self.moves.clear();
        self.mcts.new_game();
        self.alpha_beta.new_game();
    }

    /// Back to the initial position, forgetting search state.
    pub fn new_game(&mut self) {
        self.reset_to(Position::startpos());
    }

    /// Replaces the position with one parsed from FEN, keeping the engine
    /// configuration.
    pub fn set_fen(&mut self, fen: &str) -> GameResult<()> {
        let position = Position::from_fen(fen)?;
        self.reset_to(position);
        Ok(())
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.config.mode = mode;
    }

    pub fn set_move_time(&mut self, move_time: Duration) {
        self.config.move_time_ms = move_time.as_millis() as u64;
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.gen.generate(&self.position, false)
    }

    /// Plays `mv` if it is legal in the current position.
    pub fn play(&mut self, mv: Move) -> GameResult<()> {
        if !self.legal_moves().contains(&mv) {
            return Err(GameError::IllegalMove(mv.to_string()));
        }

        self.position.apply_move(mv);
        self.position_history.push(self.position.zobrist_hash());
        self.moves.push(mv);
        self.mcts.advance(mv);

        let status = self.status();
        if status != GameStatus::Ongoing {
            info!(?status, moves = self.moves.len(), "game over");
        }
        Ok(())
    }

    /// Plays a move given in UCI notation (`e2e4`, `e7e8q`) and returns it.
    pub fn play_uci(&mut self, text: &str) -> GameResult<Move> {
        if !is_uci_move_text(text) {
            return Err(GameError::InvalidMoveText(text.to_string()));
        }
        let mv = parse_uci_move(&self.position, &self.gen, text)
            .ok_or_else(|| GameError::IllegalMove(text.to_string()))?;
        self.play(mv)?;
        Ok(mv)
    }

    /// Searches the current position for `budget` with the given mode.
    /// Returns `None` only when there is no legal move.
    pub fn search(&mut self, mode: SearchMode, budget: Duration) -> Option<Move> {
        self.search_with_limits(mode, SearchLimits::time(budget))
            .best_move
    }

    /// Searches with the mode and move time from the configuration.
    pub fn search_default(&mut self) -> Option<Move> {
        self.search(self.config.mode, self.config.move_time())
    }

    pub fn search_with_limits(&mut self, mode: SearchMode, limits: SearchLimits) -> SearchResult {
        match mode {
            SearchMode::AlphaBeta => {
                let before = self.position_history.len().saturating_sub(1);
                self.alpha_beta
                    .set_game_history(&self.position_history[..before]);
                self.alpha_beta.search(&self.position, limits)
            }
            SearchMode::Mcts => {
                self.mcts.set_rollout(Rollout::Random);
                self.mcts.search(&self.position, limits)
            }
            SearchMode::MctsAlphaBeta => {
                self.mcts.set_rollout(Rollout::AlphaBeta {
                    depth: self.config.rollout_depth,
                });
                self.mcts.search(&self.position, limits)
            }
        }
    }

    /// Check if the current position has occurred three times.
    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.position_history.last().copied();
        let count = self
            .position_history
            .iter()
            .filter(|&&h| Some(h) == current)
            .count();
        count >= 3
    }

    /// Mate and stalemate first, then the fifty-move rule, repetition and
    /// insufficient material.
    pub fn status(&self) -> GameStatus {
        let moves = self.legal_moves();
        if moves.is_empty() {
            return if self.gen.is_in_check(&self.position) {
                GameStatus::Checkmate
            } else {
                GameStatus::Draw(DrawReason::Stalemate)
            };
        }
        if self.position.is_fifty_move_draw() {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }
        if self.is_threefold_repetition() {
            return GameStatus::Draw(DrawReason::Repetition);
        }
        if self.position.is_insufficient_material() {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }
        GameStatus::Ongoing
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Shape check for UCI move text: two squares and an optional promotion
/// letter.
fn is_uci_move_text(text: &str) -> bool {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return false;
    }
    let squares_ok = coord_to_sq(&text[0..2]).is_some() && coord_to_sq(&text[2..4]).is_some();
    let promo_ok = text[4..].chars().all(|c| {
        matches!(
            PieceKind::from_char(c),
            Some(PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
        )
    });
    squares_ok && promo_ok
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
