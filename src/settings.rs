//! Game settings and tuning
//!
//! Everything the difficulty curve depends on lives here rather than being
//! scattered as magic numbers: density curve, sharp-turn threshold,
//! collision window, reaction spacing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Starting forward speed (track units per second)
    pub fn initial_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 24.0,
            Difficulty::Normal => 30.0,
            Difficulty::Hard => 40.0,
        }
    }

    /// Lateral steering speed (lane offset per second)
    pub fn lateral_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.6,
            Difficulty::Normal => 2.0,
            Difficulty::Hard => 2.4,
        }
    }
}

/// Game configuration
///
/// Recognized options plus the tunables with no documented derivation in
/// the original; tests override individual fields instead of guessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected difficulty preset
    pub difficulty: Difficulty,

    // === Speed & scoring ===
    /// Starting forward speed (track units/s)
    pub initial_speed: f32,
    /// Lateral steering speed (lane offset/s)
    pub lateral_speed: f32,
    /// Speed multiplier per level crossing (0.08 = +8%)
    pub speed_growth_per_level: f32,
    /// Score points per difficulty level
    pub score_units_per_level: u64,
    /// Track units traveled per score point
    pub distance_per_point: f32,

    // === Projection ===
    pub camera_depth: f32,
    pub lane_half_width: f32,
    pub draw_distance: f32,

    // === Track generation ===
    pub segment_min_length: f32,
    pub segment_max_length: f32,
    pub max_curvature: f32,
    pub sharp_turn_threshold: f32,
    pub retention_margin: f32,

    // === Obstacles ===
    pub obstacle_density_base: f32,
    pub obstacle_density_slope: f32,
    pub obstacle_density_cap: f32,
    pub obstacle_lanes: u32,
    /// Reaction window (s); same-lane obstacle spacing >= speed * this
    pub reaction_window: f32,

    // === Collision ===
    pub collision_threshold: f32,
    pub min_collision_epsilon: f32,
    /// Collisions armed only once score reaches this
    pub collision_grace_score: u64,

    // === Jump ===
    pub jump_duration: f32,
    pub jump_cooldown: f32,
}

impl Default for Config {
    fn default() -> Self {
        let difficulty = Difficulty::default();
        Self {
            difficulty,
            initial_speed: difficulty.initial_speed(),
            lateral_speed: difficulty.lateral_speed(),
            speed_growth_per_level: SPEED_GROWTH_PER_LEVEL,
            score_units_per_level: SCORE_UNITS_PER_LEVEL,
            distance_per_point: DISTANCE_PER_POINT,

            camera_depth: CAMERA_DEPTH,
            lane_half_width: LANE_HALF_WIDTH,
            draw_distance: DRAW_DISTANCE,

            segment_min_length: SEGMENT_MIN_LENGTH,
            segment_max_length: SEGMENT_MAX_LENGTH,
            max_curvature: MAX_CURVATURE,
            sharp_turn_threshold: SHARP_TURN_THRESHOLD,
            retention_margin: RETENTION_MARGIN,

            obstacle_density_base: OBSTACLE_DENSITY_BASE,
            obstacle_density_slope: OBSTACLE_DENSITY_SLOPE,
            obstacle_density_cap: OBSTACLE_DENSITY_CAP,
            obstacle_lanes: OBSTACLE_LANES,
            reaction_window: REACTION_WINDOW,

            collision_threshold: COLLISION_THRESHOLD,
            min_collision_epsilon: MIN_COLLISION_EPSILON,
            collision_grace_score: COLLISION_GRACE_SCORE,

            jump_duration: JUMP_DURATION,
            jump_cooldown: JUMP_COOLDOWN,
        }
    }
}

impl Config {
    /// Create a config from a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut config = Self::default();
        config.apply_difficulty(difficulty);
        config
    }

    /// Apply a difficulty preset (updates the speed fields)
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.initial_speed = difficulty.initial_speed();
        self.lateral_speed = difficulty.lateral_speed();
    }

    /// Obstacle spawn probability per track unit at the given level.
    /// Level 0 is a tutorial: no obstacles at all.
    pub fn obstacle_density(&self, level: u32) -> f32 {
        if level == 0 {
            return 0.0;
        }
        (self.obstacle_density_base + self.obstacle_density_slope * level as f32)
            .min(self.obstacle_density_cap)
    }

    /// Minimum same-lane obstacle spacing at the given speed. The fairness
    /// invariant: a dodge must always be achievable within the reaction
    /// window.
    pub fn min_obstacle_spacing(&self, speed: f32) -> f32 {
        speed * self.reaction_window
    }

    /// Load from a JSON file; defaults if missing or unreadable
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Config file {} unparseable ({e}), using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_round_trip() {
        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_apply_difficulty_updates_speeds() {
        let mut config = Config::default();
        config.apply_difficulty(Difficulty::Hard);
        assert_eq!(config.initial_speed, Difficulty::Hard.initial_speed());
        assert_eq!(config.lateral_speed, Difficulty::Hard.lateral_speed());
    }

    #[test]
    fn test_density_zero_at_level_zero() {
        let config = Config::default();
        assert_eq!(config.obstacle_density(0), 0.0);
        assert!(config.obstacle_density(1) > 0.0);
    }

    #[test]
    fn test_density_capped() {
        let config = Config::default();
        assert_eq!(config.obstacle_density(1000), config.obstacle_density_cap);
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = Config::from_difficulty(Difficulty::Hard);
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.difficulty, Difficulty::Hard);
        assert_eq!(back.initial_speed, config.initial_speed);
        assert_eq!(back.sharp_turn_threshold, config.sharp_turn_threshold);
    }
}
