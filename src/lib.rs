//! Starlane - an endless pseudo-3D lane racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projection, track generation, scroll, collisions)
//! - `render`: Pure draw-list composition (no pixels touched here)
//! - `highscores`: File-backed leaderboard
//! - `settings`: Data-driven tuning and difficulty presets
//! - `audio`: Game-event to sound-effect mapping for an external sink

pub mod audio;
pub mod error;
pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use highscores::HighScores;
pub use settings::{Config, Difficulty};

/// Game configuration constants
///
/// These are the defaults; anything a player or test might want to tune is
/// mirrored in [`settings::Config`].
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the render cadence)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Screen dimensions (logical pixels, y grows downward)
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;
    /// Horizon line: vanishing point sits 25% down from the top
    pub const HORIZON_Y: f32 = 200.0;

    /// Perspective divide depth: scale = depth / (depth + distance)
    pub const CAMERA_DEPTH: f32 = 24.0;
    /// Screen half-width of the track at scale 1.0 (lateral offset ±1)
    pub const LANE_HALF_WIDTH: f32 = 460.0;
    /// How far ahead of the camera geometry is generated and drawn
    pub const DRAW_DISTANCE: f32 = 160.0;
    /// Segments are kept this far behind the camera before pruning
    pub const RETENTION_MARGIN: f32 = 12.0;

    /// Track segment length range (track units)
    pub const SEGMENT_MIN_LENGTH: f32 = 8.0;
    pub const SEGMENT_MAX_LENGTH: f32 = 24.0;
    /// Curvature range: screen-px of lane-center drift per track unit at scale 1
    pub const MAX_CURVATURE: f32 = 6.0;
    /// Above this magnitude a turn counts as "sharp" for the S-turn rule
    pub const SHARP_TURN_THRESHOLD: f32 = 3.0;
    /// Curvature rerolls before falling back to a straight segment
    pub const CURVATURE_RETRIES: u32 = 4;

    /// Obstacle probability per track unit: min(base + slope * level, cap)
    pub const OBSTACLE_DENSITY_BASE: f32 = 0.02;
    pub const OBSTACLE_DENSITY_SLOPE: f32 = 0.008;
    pub const OBSTACLE_DENSITY_CAP: f32 = 0.08;
    /// Obstacles snap to this many lateral lanes
    pub const OBSTACLE_LANES: u32 = 3;
    /// Outermost obstacle lane offset
    pub const OBSTACLE_MAX_OFFSET: f32 = 0.7;
    /// Reaction window (seconds); same-lane spacing >= speed * this
    pub const REACTION_WINDOW: f32 = 0.6;

    /// Lateral overlap below this is a hit
    pub const COLLISION_THRESHOLD: f32 = 0.25;
    /// Floor for the near-field collision window (track units)
    pub const MIN_COLLISION_EPSILON: f32 = 0.75;
    /// Collisions are armed only once the score reaches this (tutorial grace)
    pub const COLLISION_GRACE_SCORE: u64 = 5;

    /// Score: one point per this many track units traveled
    pub const DISTANCE_PER_POINT: f32 = 1.0;
    /// Score units per difficulty level
    pub const SCORE_UNITS_PER_LEVEL: u64 = 100;
    /// Speed multiplier applied once per level crossing (8%)
    pub const SPEED_GROWTH_PER_LEVEL: f32 = 0.08;

    /// Jump mechanics (seconds)
    pub const JUMP_DURATION: f32 = 0.6;
    pub const JUMP_COOLDOWN: f32 = 0.3;
}
