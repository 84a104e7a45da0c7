use std::time::{Duration, Instant};

use crate::game::{Status, TickOutcome};

/// In-memory statistics for one run of the program. Nothing is persisted.
pub struct SessionMetrics {
    pub game_started: Instant,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
    pub food_eaten: u32,
    recorded_end: bool,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            game_started: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            food_eaten: 0,
            recorded_end: false,
        }
    }

    /// Refresh the game clock; it stops once the current game has ended
    pub fn update(&mut self) {
        if !self.recorded_end {
            self.elapsed_time = self.game_started.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.game_started = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.recorded_end = false;
    }

    /// Fold a tick into the stats. Each finished game is counted once.
    pub fn on_tick(&mut self, outcome: TickOutcome, status: Status, score: u32) {
        if outcome.ate_food {
            self.food_eaten += 1;
        }
        if !status.is_playing() && !self.recorded_end {
            self.recorded_end = true;
            self.elapsed_time = self.game_started.elapsed();
            self.games_played += 1;
            self.best_score = self.best_score.max(score);
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
