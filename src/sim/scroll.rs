//! Scroll state: forward position, speed, score, level
//!
//! Speed growth is applied by level delta, never per frame: a single score
//! event that jumps two level boundaries multiplies speed by the growth
//! factor twice, and frame-rate variance can never double-apply it.

use serde::{Deserialize, Serialize};

use crate::settings::Config;

/// Forward scroll state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollState {
    /// Total forward distance traveled (track units)
    pub position: f32,
    /// Current forward speed (track units/s)
    pub speed: f32,
    /// Score (points)
    pub score: u64,
    /// Difficulty level, score / units_per_level
    pub level: u32,

    initial_speed: f32,
    growth_per_level: f32,
    units_per_level: u64,
}

impl ScrollState {
    pub fn new(config: &Config) -> Self {
        Self {
            position: 0.0,
            speed: config.initial_speed,
            score: 0,
            level: 0,
            initial_speed: config.initial_speed,
            growth_per_level: config.speed_growth_per_level,
            units_per_level: config.score_units_per_level.max(1),
        }
    }

    /// Advance forward position by one tick
    pub fn advance(&mut self, dt: f32) {
        debug_assert!(dt >= 0.0);
        self.position += self.speed * dt;
    }

    /// Add score and recompute the level. The speed multiplier is applied
    /// exactly once per boundary crossed, in order. Returns how many levels
    /// were crossed.
    pub fn record_score_event(&mut self, delta: u64) -> u32 {
        self.score += delta;
        let new_level = (self.score / self.units_per_level) as u32;
        let crossings = new_level.saturating_sub(self.level);
        for _ in 0..crossings {
            self.speed *= 1.0 + self.growth_per_level;
        }
        self.level = new_level;
        crossings
    }

    /// Color theme cycles through exactly 4 themes, one per level
    #[inline]
    pub fn theme_index(&self) -> u8 {
        (self.level % 4) as u8
    }

    /// Return to initial values (new game / after game over)
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.speed = self.initial_speed;
        self.score = 0;
        self.level = 0;
    }

    /// Unrecoverable state corruption check (NaN position, negative or NaN
    /// speed). The tick treats this as fatal and forces game over.
    pub fn is_corrupt(&self) -> bool {
        !self.position.is_finite() || !self.speed.is_finite() || self.speed < 0.0
    }
}
