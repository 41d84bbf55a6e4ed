//! Perspective projection
//!
//! The depth illusion comes from one reciprocal divide: an object at
//! forward distance d shrinks by scale = depth / (depth + d), which is 1 at
//! the camera and converges to 0 at the vanishing point. Lateral offsets
//! and accumulated lane drift are multiplied by the same scale, so the
//! whole track narrows toward the horizon.

use serde::{Deserialize, Serialize};

use super::track::TrackSegment;
use crate::error::GameError;
use crate::settings::Config;

/// Camera parameters for the perspective divide
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    /// Depth constant: scale = depth / (depth + distance). Must be > 0.
    pub depth: f32,
    /// Screen half-width of the track at scale 1.0
    pub lane_half_width: f32,
}

impl Camera {
    pub fn from_config(config: &Config) -> Self {
        Self {
            depth: config.camera_depth,
            lane_half_width: config.lane_half_width,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            depth: crate::consts::CAMERA_DEPTH,
            lane_half_width: crate::consts::LANE_HALF_WIDTH,
        }
    }
}

/// Screen-space viewport, y grows downward
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Vertical position of the horizon line
    pub horizon_y: f32,
}

impl Viewport {
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: crate::consts::SCREEN_WIDTH,
            height: crate::consts::SCREEN_HEIGHT,
            horizon_y: crate::consts::HORIZON_Y,
        }
    }
}

/// A point projected to screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f32,
    pub y: f32,
    /// Perspective shrink factor, (0, 1]
    pub scale: f32,
}

/// Project a track-relative position to screen space.
///
/// `lateral_offset` is the lane offset in [-1, 1], `forward_distance` the
/// distance ahead of the camera (>= 0), `drift_offset` the accumulated
/// lane-center drift at that distance in screen px at scale 1 (see
/// [`DriftAccumulator`]).
///
/// Geometry behind the camera must be filtered before calling; a negative
/// distance here is a programming error, not a render decision.
pub fn project(
    lateral_offset: f32,
    forward_distance: f32,
    drift_offset: f32,
    camera: &Camera,
    viewport: &Viewport,
) -> Result<ProjectedPoint, GameError> {
    if forward_distance < 0.0 {
        return Err(GameError::InvalidArgument("forward_distance < 0"));
    }
    if camera.depth <= 0.0 {
        return Err(GameError::InvalidArgument("camera_depth <= 0"));
    }

    let scale = camera.depth / (camera.depth + forward_distance);
    let x = viewport.center_x() + lateral_offset * camera.lane_half_width * scale + drift_offset * scale;
    // Near geometry (scale 1) sits at the screen bottom, far geometry
    // converges to the horizon line.
    let y = viewport.height - (1.0 - scale) * (viewport.height - viewport.horizon_y);

    Ok(ProjectedPoint { x, y, scale })
}

/// Accumulates lane-center drift over the active segment window.
///
/// Drift is measured from the camera position so the lane under the player
/// stays centered: a segment contributes curvature * overlap for the part
/// of it that lies between the camera and the queried distance. Turns read
/// as continuous because each segment's full drift carries forward into
/// the next.
pub struct DriftAccumulator<'a> {
    segments: &'a [TrackSegment],
    camera_position: f32,
}

impl<'a> DriftAccumulator<'a> {
    pub fn new(segments: &'a [TrackSegment], camera_position: f32) -> Self {
        Self {
            segments,
            camera_position,
        }
    }

    /// Accumulated drift (screen px at scale 1) at an absolute track distance
    pub fn drift_at(&self, distance: f32) -> f32 {
        let mut drift = 0.0;
        for segment in self.segments {
            let from = segment.start_distance.max(self.camera_position);
            let to = segment.end_distance().min(distance);
            if to > from {
                drift += segment.curvature * (to - from);
            }
            if segment.start_distance > distance {
                break;
            }
        }
        drift
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segment(id: u64, start: f32, length: f32, curvature: f32) -> TrackSegment {
        TrackSegment {
            id,
            start_distance: start,
            length,
            curvature,
            width_at_start: 1.0,
            color_theme_index: 0,
        }
    }

    #[test]
    fn test_scale_at_camera_is_one() {
        let p = project(0.0, 0.0, 0.0, &Camera::default(), &Viewport::default()).unwrap();
        assert!((p.scale - 1.0).abs() < 1e-6);
        // Near geometry sits at the screen bottom
        assert!((p.y - Viewport::default().height).abs() < 1e-3);
    }

    #[test]
    fn test_far_geometry_approaches_horizon() {
        let viewport = Viewport::default();
        let p = project(0.0, 1e6, 0.0, &Camera::default(), &viewport).unwrap();
        assert!(p.scale < 1e-3);
        assert!((p.y - viewport.horizon_y).abs() < 1.0);
    }

    #[test]
    fn test_invalid_arguments_rejected() {
        let camera = Camera {
            depth: 0.0,
            ..Camera::default()
        };
        assert!(project(0.0, 10.0, 0.0, &camera, &Viewport::default()).is_err());
        assert!(project(0.0, -1.0, 0.0, &Camera::default(), &Viewport::default()).is_err());
    }

    #[test]
    fn test_lateral_offset_shrinks_with_distance() {
        let camera = Camera::default();
        let viewport = Viewport::default();
        let near = project(1.0, 0.0, 0.0, &camera, &viewport).unwrap();
        let far = project(1.0, 100.0, 0.0, &camera, &viewport).unwrap();
        let center = viewport.center_x();
        assert!((near.x - center) > (far.x - center));
    }

    #[test]
    fn test_drift_zero_at_camera() {
        let segments = [segment(0, 0.0, 20.0, 2.0), segment(1, 20.0, 20.0, -1.0)];
        let drift = DriftAccumulator::new(&segments, 10.0);
        assert_eq!(drift.drift_at(10.0), 0.0);
    }

    #[test]
    fn test_drift_carries_across_segments() {
        let segments = [segment(0, 0.0, 20.0, 2.0), segment(1, 20.0, 20.0, -1.0)];
        let drift = DriftAccumulator::new(&segments, 0.0);
        // Entirely within the first segment
        assert!((drift.drift_at(10.0) - 20.0).abs() < 1e-4);
        // First segment's full drift carries into the second
        let at_30 = drift.drift_at(30.0);
        assert!((at_30 - (2.0 * 20.0 - 1.0 * 10.0)).abs() < 1e-4);
    }

    #[test]
    fn test_drift_continuous_at_boundary() {
        let segments = [segment(0, 0.0, 20.0, 3.0), segment(1, 20.0, 20.0, -3.0)];
        let drift = DriftAccumulator::new(&segments, 0.0);
        let just_before = drift.drift_at(20.0 - 1e-3);
        let just_after = drift.drift_at(20.0 + 1e-3);
        assert!((just_before - just_after).abs() < 0.1);
    }

    proptest! {
        #[test]
        fn prop_scale_in_unit_interval(distance in 0.0f32..1e6, depth in 0.1f32..1e4) {
            let camera = Camera { depth, lane_half_width: 460.0 };
            let p = project(0.0, distance, 0.0, &camera, &Viewport::default()).unwrap();
            prop_assert!(p.scale > 0.0);
            prop_assert!(p.scale <= 1.0);
        }

        #[test]
        fn prop_scale_strictly_decreasing(
            distance in 0.0f32..1e4,
            step in 1.0f32..1e3,
            depth in 0.1f32..1e3,
        ) {
            let camera = Camera { depth, lane_half_width: 460.0 };
            let viewport = Viewport::default();
            let near = project(0.0, distance, 0.0, &camera, &viewport).unwrap();
            let far = project(0.0, distance + step, 0.0, &camera, &viewport).unwrap();
            prop_assert!(far.scale < near.scale);
        }
    }
}
