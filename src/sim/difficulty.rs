//! Adaptive difficulty
//!
//! Every `check_interval` cumulative brick hits the short-window hit rate
//! is evaluated. A rate above the threshold shrinks the paddle, and only a
//! shrink that actually happened buys the paddle extra speed. Difficulty
//! never decreases within a session.

use serde::{Deserialize, Serialize};

use super::state::{HitCounters, Paddle};
use crate::config::DifficultyConfig;

/// Result of one checkpoint evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Short-window hit rate the decision was based on
    pub hit_rate: f32,
    /// True when the paddle shrank (and sped up)
    pub raised: bool,
}

/// Checkpoint-driven paddle adjuster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyController {
    tuning: DifficultyConfig,
    /// Cumulative hit count at the previous checkpoint
    last_check_hits: u32,
    /// Number of times the paddle was actually shrunk
    pub raises: u32,
}

impl DifficultyController {
    pub fn new(tuning: DifficultyConfig) -> Self {
        Self {
            tuning,
            last_check_hits: 0,
            raises: 0,
        }
    }

    pub fn last_check_hits(&self) -> u32 {
        self.last_check_hits
    }

    /// Run once per tick after collisions.
    ///
    /// Returns `Some` only on ticks where a checkpoint was reached; the
    /// short-window counters are zeroed whenever that happens.
    pub fn update(&mut self, counters: &mut HitCounters, paddle: &mut Paddle) -> Option<Evaluation> {
        if counters.total_hits.saturating_sub(self.last_check_hits) < self.tuning.check_interval {
            return None;
        }

        let hit_rate = counters.window_hit_rate();
        let mut raised = false;
        if hit_rate > self.tuning.high_threshold && paddle.adjust_width(-self.tuning.width_step) {
            paddle.adjust_speed(self.tuning.speed_step);
            self.raises += 1;
            raised = true;
            log::info!(
                "Difficulty raised: paddle width {:.0}, speed {:.1}",
                paddle.width,
                paddle.speed
            );
        }
        log::debug!(
            "Difficulty checkpoint at {} hits: window rate {:.2}, raised={}",
            counters.total_hits,
            hit_rate,
            raised
        );

        self.last_check_hits = counters.total_hits;
        counters.reset_window();
        Some(Evaluation { hit_rate, raised })
    }
}
