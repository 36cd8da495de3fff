//! Time control and search limits for chess engines.
//!
//! The clock is only read at explicit points (after each child, every
//! [`CHECK_INTERVAL`] nodes), so a search may overrun its budget slightly.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// How often, in nodes, hot loops should look at the clock.
pub const CHECK_INTERVAL: u64 = 1024;

/// Search limits that control when an engine should stop searching.
///
/// Engines stop at whichever of depth and time runs out first. When time
/// runs out the engine returns the best move of the last completed depth.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies (half-moves)
    pub depth: u8,
    /// Maximum time allowed for this move (None = infinite)
    pub move_time: Option<Duration>,
    /// Maximum MCTS iterations (None = until time runs out)
    pub iterations: Option<u64>,
    /// Time controller for checking if search should stop
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Create limits with only depth constraint (no time limit).
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            iterations: None,
            time_control: TimeControl::new(None),
        }
    }

    /// Create limits with both depth and time constraints.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            iterations: None,
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Create limits with only time constraint (infinite depth).
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: u8::MAX,
            move_time: Some(move_time),
            iterations: None,
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// A fixed number of tree-search iterations and no clock.
    pub fn iterations(iterations: u64) -> Self {
        Self {
            depth: u8::MAX,
            move_time: None,
            iterations: Some(iterations),
            time_control: TimeControl::new(None),
        }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Start the time control clock. Call this when search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Wall-clock budget for one search.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Cell<bool>,
    start_time: Cell<Option<Instant>>,
    /// Time limit for this search (None = infinite)
    time_limit: Option<Duration>,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Cell::new(false),
            start_time: Cell::new(None),
            time_limit,
        }
    }

    /// Start the clock and clear any earlier stop.
    pub fn start(&self) {
        self.start_time.set(Some(Instant::now()));
        self.stopped.set(false);
    }

    /// Force stop the search.
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Looks at the clock and latches the stop flag once the limit passes.
    /// Returns whether the search should stop.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let (Some(limit), Some(start)) = (self.time_limit, self.start_time.get()) {
            if start.elapsed() >= limit {
                self.stop();
                return true;
            }
        }
        false
    }

    /// Returns true every [`CHECK_INTERVAL`] nodes.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes % CHECK_INTERVAL == 0
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Get elapsed time since search started.
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .get()
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Get remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
