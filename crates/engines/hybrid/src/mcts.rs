//! Monte-Carlo tree search engine.
//!
//! Each iteration selects a leaf by UCB1, expands it once it has been
//! visited, scores the new leaf with a rollout and backs the result up to
//! the root. The tree survives between searches and follows the game via
//! [`MctsEngine::advance`].

use chess_core::{Engine, Move, MoveGenerator, Position, SearchLimits, SearchResult};
use classical_engine::TranspositionTable;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::rollout::{alpha_beta_rollout, centipawns, random_rollout, Rollout};
use crate::tree::{ChildStats, Tree};

/// Iterations used when the limits carry neither a clock nor an
/// iteration budget.
pub const DEFAULT_ITERATIONS: u64 = 10_000;

/// Tree-search tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsSettings {
    pub exploration: f64,
    pub rollout: Rollout,
    pub max_rollout_plies: u32,
}

impl Default for MctsSettings {
    fn default() -> Self {
        Self {
            exploration: 2.0,
            rollout: Rollout::Random,
            max_rollout_plies: 400,
        }
    }
}

impl MctsSettings {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            exploration: config.exploration,
            rollout: Rollout::Random,
            max_rollout_plies: config.max_rollout_plies,
        }
    }
}

pub struct MctsEngine {
    settings: MctsSettings,
    tree: Option<Tree>,
    /// Shared by every alpha-beta rollout
    tt: TranspositionTable,
    rng: StdRng,
    gen: MoveGenerator<'static>,
    last_stats: Vec<ChildStats>,
}

impl MctsEngine {
    pub fn new(settings: MctsSettings, tt_entries: usize) -> Self {
        Self::with_rng(settings, tt_entries, StdRng::from_entropy())
    }

    /// Engine with a fixed random seed, for reproducible searches.
    pub fn with_seed(settings: MctsSettings, tt_entries: usize, seed: u64) -> Self {
        Self::with_rng(settings, tt_entries, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: MctsSettings, tt_entries: usize, rng: StdRng) -> Self {
        Self {
            settings,
            tree: None,
            tt: TranspositionTable::new(tt_entries),
            rng,
            gen: MoveGenerator::global(),
            last_stats: Vec::new(),
        }
    }

    pub fn settings(&self) -> MctsSettings {
        self.settings
    }

    /// Switches the leaf evaluator. Statistics gathered with another
    /// evaluator are not comparable, so the tree is dropped.
    pub fn set_rollout(&mut self, rollout: Rollout) {
        if self.settings.rollout != rollout {
            self.settings.rollout = rollout;
            self.tree = None;
        }
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// Root-child statistics of the last search.
    pub fn last_stats(&self) -> &[ChildStats] {
        &self.last_stats
    }

    /// Follows a move played in the game, keeping the matching subtree if
    /// the search had expanded it.
    pub fn advance(&mut self, mv: Move) {
        self.tree = self.tree.as_ref().and_then(|tree| tree.reroot(mv));
    }

    /// One select, expand, evaluate, backpropagate cycle.
    fn iterate(&mut self) {
        let Some(tree) = self.tree.as_mut() else {
            return;
        };

        let mut leaf = tree.select(self.settings.exploration);
        if tree.node(leaf).playouts > 0 && tree.expand(leaf, &self.gen) {
            if let Some(&child) = tree.node(leaf).children.choose(&mut self.rng) {
                leaf = child;
            }
        }

        let position = &tree.node(leaf).position;
        let value = match self.settings.rollout {
            Rollout::Random => random_rollout(
                position,
                &self.gen,
                &mut self.rng,
                self.settings.max_rollout_plies,
            ),
            Rollout::AlphaBeta { depth } => alpha_beta_rollout(position, &mut self.tt, depth),
        };

        // value is for the side to move at the leaf; the node is credited
        // from the side that moved into it
        tree.backpropagate(leaf, 1.0 - value);
    }
}

impl Engine for MctsEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        limits.start();

        let reuse = self
            .tree
            .as_ref()
            .is_some_and(|tree| tree.root().position == *pos);
        if !reuse {
            self.tree = Some(Tree::new(pos.clone()));
        }
        // Expand the root up front so even a single iteration leaves a move
        // to choose from.
        if let Some(tree) = self.tree.as_mut() {
            tree.expand(crate::tree::ROOT, &self.gen);
        }

        let budget = match (limits.iterations, limits.move_time) {
            (Some(n), _) => Some(n),
            (None, Some(_)) => None,
            (None, None) => Some(DEFAULT_ITERATIONS),
        };

        let mut iterations = 0u64;
        loop {
            self.iterate();
            iterations += 1;
            if budget.is_some_and(|n| iterations >= n) {
                break;
            }
            if limits.time_control.check_time() {
                break;
            }
        }

        let Some(tree) = self.tree.as_ref() else {
            return SearchResult {
                best_move: None,
                score: 0,
                depth: 0,
                nodes: iterations,
                stopped: false,
            };
        };

        self.last_stats = tree.child_stats();
        for stats in &self.last_stats {
            trace!(mv = %stats.mv, score = stats.score, playouts = stats.playouts, "root child");
        }

        let best = tree.best_child();
        let best_move = best.and_then(|node| node.mv);
        let win_rate = best.map(|node| node.win_rate()).unwrap_or(0.5);
        debug!(
            iterations,
            root_playouts = tree.root().playouts,
            tree_size = tree.len(),
            reused = reuse,
            best = %best_move.map(|m| m.to_string()).unwrap_or_else(|| "none".into()),
            win_rate,
            "tree search complete"
        );

        SearchResult {
            best_move,
            score: centipawns(win_rate),
            depth: 0,
            nodes: iterations,
            stopped: limits.should_stop(),
        }
    }

    fn name(&self) -> &str {
        match self.settings.rollout {
            Rollout::Random => "MCTS",
            Rollout::AlphaBeta { .. } => "MCTS + alpha-beta",
        }
    }

    fn new_game(&mut self) {
        self.tree = None;
        self.tt.clear();
        self.last_stats.clear();
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "exploration" => match value.trim().parse::<f64>() {
                Ok(c) if c >= 0.0 => {
                    self.settings.exploration = c;
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "mcts_tests.rs"]
mod mcts_tests;
