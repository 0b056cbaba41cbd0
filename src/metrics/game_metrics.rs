use std::time::{Duration, Instant};

use crate::game::GameOutcome;

/// Per-session bookkeeping kept by the host, outside the engine
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub total_xp: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            total_xp: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Record a finished game; returns the XP granted for it.
    /// Training games count towards the tally but earn nothing.
    pub fn on_game_over(&mut self, outcome: GameOutcome, training: bool) -> u32 {
        self.update();
        self.games_played += 1;
        if outcome.final_score > self.high_score {
            self.high_score = outcome.final_score;
        }

        let xp = if training { 0 } else { outcome.xp_earned() };
        self.total_xp += xp;
        xp
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
