//! Procedural track generation
//!
//! The track is an unbounded sequence of segments, materialized as a
//! rolling window: `ensure_buffered` appends until the window covers the
//! requested distance, `prune` drops what has fallen behind the camera.
//! Obstacle difficulty reads the live scroll state at generation time, so
//! density always matches the current level and spacing the current speed.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::scroll::ScrollState;
use crate::error::GameError;
use crate::settings::Config;

/// One stretch of track. Immutable once created; the generator discards it
/// when it leaves the retention window, it is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSegment {
    pub id: u64,
    pub start_distance: f32,
    pub length: f32,
    /// Signed lane-center drift per track unit (screen px at scale 1).
    /// Positive bends the road right.
    pub curvature: f32,
    /// Track half-width multiplier at the segment start
    pub width_at_start: f32,
    /// Theme stamped at generation time: level % 4
    pub color_theme_index: u8,
}

impl TrackSegment {
    #[inline]
    pub fn end_distance(&self) -> f32 {
        self.start_distance + self.length
    }

    #[inline]
    pub fn contains(&self, distance: f32) -> bool {
        distance >= self.start_distance && distance < self.end_distance()
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Block,
    Hazard,
}

/// An obstacle on the track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u64,
    /// Forward position (absolute track units)
    pub distance: f32,
    /// Lane offset in [-1, 1], relative to lane center
    pub lateral_offset: f32,
    pub kind: ObstacleKind,
}

/// Pull-based generator owning the active window of segments and obstacles
pub struct TrackGenerator {
    seed: u64,
    rng: Pcg32,
    config: Config,
    segments: Vec<TrackSegment>,
    obstacles: Vec<Obstacle>,
    next_segment_id: u64,
    next_obstacle_id: u64,
    /// Last obstacle distance per lane, for the fairness spacing rule
    last_obstacle_at: Vec<f32>,
    generated_to: f32,
}

impl TrackGenerator {
    pub fn new(seed: u64, config: &Config) -> Self {
        let lanes = config.obstacle_lanes.max(1) as usize;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config: config.clone(),
            segments: Vec::new(),
            obstacles: Vec::new(),
            next_segment_id: 0,
            next_obstacle_id: 0,
            last_obstacle_at: vec![f32::NEG_INFINITY; lanes],
            generated_to: 0.0,
        }
    }

    /// Append segments (and their obstacles) until the window covers at
    /// least `up_to`. Level and speed are read from `scroll` live.
    pub fn ensure_buffered(&mut self, up_to: f32, scroll: &ScrollState) {
        while self.generated_to < up_to {
            self.push_segment(scroll);
        }
    }

    /// Snapshot of the active window, ordered by start distance ascending
    pub fn active_segments(&self) -> &[TrackSegment] {
        &self.segments
    }

    /// Active obstacles, ordered by distance (and therefore by id)
    pub fn active_obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// The segment containing the given distance, if buffered
    pub fn segment_at(&self, distance: f32) -> Option<&TrackSegment> {
        self.segments.iter().find(|s| s.contains(distance))
    }

    /// Drop segments and obstacles fully behind `before`, minus the
    /// retention margin (kept briefly so geometry straddling the camera
    /// does not pop).
    pub fn prune(&mut self, before: f32) {
        let cutoff = before - self.config.retention_margin;
        self.segments.retain(|s| s.end_distance() >= cutoff);
        self.obstacles.retain(|o| o.distance >= cutoff);
    }

    /// Clear the window and restart generation from segment id 0 with the
    /// original seed.
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.segments.clear();
        self.obstacles.clear();
        self.next_segment_id = 0;
        self.next_obstacle_id = 0;
        self.last_obstacle_at.fill(f32::NEG_INFINITY);
        self.generated_to = 0.0;
    }

    fn push_segment(&mut self, scroll: &ScrollState) {
        let start = self.generated_to;
        let length = self
            .rng
            .random_range(self.config.segment_min_length..=self.config.segment_max_length);

        let previous_curvature = self.segments.last().map(|s| s.curvature);
        let curvature = self.draw_curvature(previous_curvature).unwrap_or_else(|e| {
            log::warn!("{e}; falling back to a straight segment");
            0.0
        });

        let segment = TrackSegment {
            id: self.next_segment_id,
            start_distance: start,
            length,
            curvature,
            width_at_start: 1.0,
            color_theme_index: (scroll.level % 4) as u8,
        };
        self.next_segment_id += 1;
        self.generated_to = segment.end_distance();
        self.segments.push(segment);

        self.spawn_obstacles(start, self.generated_to, scroll);
    }

    /// Draw a curvature honoring the sharp-turn rule: no two consecutive
    /// segments with the same sign both above the sharp-turn threshold.
    fn draw_curvature(&mut self, previous: Option<f32>) -> Result<f32, GameError> {
        let max = self.config.max_curvature;
        let threshold = self.config.sharp_turn_threshold;
        let retries = crate::consts::CURVATURE_RETRIES;

        for _ in 0..retries {
            let candidate = self.rng.random_range(-max..=max);
            let violates = match previous {
                Some(prev) => {
                    prev.signum() == candidate.signum()
                        && prev.abs() > threshold
                        && candidate.abs() > threshold
                }
                None => false,
            };
            if !violates {
                return Ok(candidate);
            }
        }
        Err(GameError::GenerationExhausted { retries })
    }

    /// Roll obstacles along a freshly generated segment. Probability per
    /// track unit grows with level; same-lane spacing honors the fairness
    /// invariant (a dodge is always achievable at the current speed).
    fn spawn_obstacles(&mut self, from: f32, to: f32, scroll: &ScrollState) {
        let density = self.config.obstacle_density(scroll.level);
        if density <= 0.0 {
            return;
        }
        let min_spacing = self.config.min_obstacle_spacing(scroll.speed);
        let lanes = self.last_obstacle_at.len();

        let mut d = from.ceil();
        while d < to {
            if self.rng.random::<f32>() < density {
                let lane = self.rng.random_range(0..lanes);
                if d - self.last_obstacle_at[lane] >= min_spacing {
                    let kind = if self.rng.random::<f32>() < 0.25 {
                        ObstacleKind::Hazard
                    } else {
                        ObstacleKind::Block
                    };
                    self.obstacles.push(Obstacle {
                        id: self.next_obstacle_id,
                        distance: d,
                        lateral_offset: lane_offset(lane, lanes),
                        kind,
                    });
                    self.next_obstacle_id += 1;
                    self.last_obstacle_at[lane] = d;
                }
            }
            d += 1.0;
        }
    }
}

/// Map a lane index to its lateral offset. Lanes are spread symmetrically
/// across [-OBSTACLE_MAX_OFFSET, OBSTACLE_MAX_OFFSET].
pub fn lane_offset(lane: usize, lanes: usize) -> f32 {
    let max = crate::consts::OBSTACLE_MAX_OFFSET;
    if lanes <= 1 {
        return 0.0;
    }
    -max + 2.0 * max * lane as f32 / (lanes - 1) as f32
}
