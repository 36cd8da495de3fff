//! UCI front end.
//!
//! Usage: `uci_engine [config.toml]`. The config path may also come from
//! `HYBRID_ENGINE_CONFIG`. Logs go to stderr so stdout carries only UCI.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chess_core::{move_to_uci, SearchLimits};
use hybrid_engine::{EngineConfig, Game, SearchMode};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "HYBRID_ENGINE_CONFIG";

/// Engine state across UCI commands.
struct Session {
    game: Game,
    /// FEN the current game started from; `None` for the start position
    base_fen: Option<String>,
    /// Moves applied on top of `base_fen`, as sent by the GUI
    applied: Vec<String>,
}

impl Session {
    fn new(config: EngineConfig) -> Self {
        Self {
            game: Game::with_config(config),
            base_fen: None,
            applied: Vec::new(),
        }
    }

    /// Handles one command line. Returns false on `quit`.
    fn handle(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Ok(true);
        };

        match command {
            "uci" => {
                writeln!(out, "id name HybridChess 0.1")?;
                writeln!(out, "id author hybrid-chess")?;
                writeln!(
                    out,
                    "option name Mode type combo default {} var mcts var mcts_alphabeta var alphabeta",
                    self.game.config().mode
                )?;
                writeln!(
                    out,
                    "option name MoveTime type spin default {} min 1 max 600000",
                    self.game.config().move_time_ms
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(&parts[1..]),
            "ucinewgame" => {
                self.game.new_game();
                self.base_fen = None;
                self.applied.clear();
            }
            "position" => self.set_position(&parts[1..]),
            "go" => self.go(&parts[1..], out)?,
            "quit" => return Ok(false),
            other => debug!(command = other, "ignoring unknown command"),
        }
        out.flush()?;
        Ok(true)
    }

    /// `setoption name <Name> value <Value>`
    fn set_option(&mut self, args: &[&str]) {
        let name_at = args.iter().position(|&a| a == "name");
        let value_at = args.iter().position(|&a| a == "value");
        let (Some(n), Some(v)) = (name_at, value_at) else {
            warn!(?args, "malformed setoption");
            return;
        };
        let name = args.get(n + 1..v).map(|w| w.join(" ")).unwrap_or_default();
        let value = args.get(v + 1..).map(|w| w.join(" ")).unwrap_or_default();

        match name.to_ascii_lowercase().as_str() {
            "mode" => match value.parse::<SearchMode>() {
                Ok(mode) => self.game.set_mode(mode),
                Err(e) => warn!(%e, "rejected Mode"),
            },
            "movetime" => match value.parse::<u64>() {
                Ok(ms) if ms > 0 => self.game.set_move_time(Duration::from_millis(ms)),
                _ => warn!(%value, "rejected MoveTime"),
            },
            _ => debug!(%name, "ignoring unknown option"),
        }
    }

    /// `position startpos|fen <FEN> [moves m1 m2 ...]`
    ///
    /// When the new move list extends the one already on the board, only
    /// the new moves are played so the search tree is kept.
    fn set_position(&mut self, args: &[&str]) {
        let moves_at = args.iter().position(|&a| a == "moves");
        let head = &args[..moves_at.unwrap_or(args.len())];
        let moves: Vec<String> = moves_at
            .map(|i| args[i + 1..].iter().map(|s| s.to_string()).collect())
            .unwrap_or_default();

        let base_fen = match head.first() {
            Some(&"startpos") => None,
            Some(&"fen") if head.len() > 1 => Some(head[1..].join(" ")),
            _ => {
                warn!(?args, "malformed position command");
                return;
            }
        };

        let continues = base_fen == self.base_fen && moves.starts_with(&self.applied);
        if !continues {
            let reset = match &base_fen {
                Some(fen) => self.game.set_fen(fen),
                None => {
                    self.game.new_game();
                    Ok(())
                }
            };
            if let Err(e) = reset {
                warn!(%e, "rejected position");
                return;
            }
            self.base_fen = base_fen;
            self.applied.clear();
        }

        for text in &moves[self.applied.len()..] {
            if let Err(e) = self.game.play_uci(text) {
                warn!(%e, "stopping at bad move");
                break;
            }
            self.applied.push(text.clone());
        }
    }

    /// `go [movetime N]`; anything else searches for the configured time.
    fn go(&mut self, args: &[&str], out: &mut impl Write) -> Result<()> {
        let move_time = args
            .iter()
            .position(|&a| a == "movetime")
            .and_then(|i| args.get(i + 1))
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.game.config().move_time());

        let mode = self.game.config().mode;
        let result = self
            .game
            .search_with_limits(mode, SearchLimits::time(move_time));

        match result.best_move {
            Some(mv) => {
                writeln!(
                    out,
                    "info depth {} score cp {} nodes {}",
                    result.depth, result.score, result.nodes
                )?;
                writeln!(out, "bestmove {}", move_to_uci(mv))?;
            }
            None => writeln!(out, "bestmove 0000")?,
        }
        Ok(())
    }
}

fn load_config() -> Result<EngineConfig> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    match path {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let config = load_config()?;
    init_logging(&config.log_level);
    info!(mode = %config.mode, move_time_ms = config.move_time_ms, "engine starting");

    // UCI engines communicate via stdin/stdout.
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = Session::new(config);

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if !session.handle(line.trim(), &mut stdout)? {
            break;
        }
    }
    Ok(())
}
