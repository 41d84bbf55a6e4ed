//! Frame composition
//!
//! Pure function of the game state: projects the active window and emits a
//! back-to-front draw list (farthest geometry first) so nearer shapes
//! overpaint farther ones without a depth buffer. The player ship is
//! always the last command.

use glam::Vec2;

use super::command::{DrawCommand, shade};
use super::theme::Theme;
use crate::sim::projection::{Camera, DriftAccumulator, Viewport, project};
use crate::sim::state::GameState;
use crate::sim::track::ObstacleKind;

/// Track row sampling step (track units); smaller bends curves smoother
const ROW_STEP: f32 = 4.0;
/// Obstacle half-size in screen px at scale 1
const OBSTACLE_HALF_SIZE: f32 = 40.0;
/// Ship dimensions relative to the viewport (matches the classic layout)
const SHIP_HALF_WIDTH: f32 = 0.05;
const SHIP_HEIGHT: f32 = 0.035;
const SHIP_BASE_OFFSET: f32 = 0.04;
/// Peak jump lift relative to viewport height
const JUMP_LIFT: f32 = 0.12;

/// Compose one frame. Commands are ordered back-to-front; the caller hands
/// the list to the display collaborator unchanged.
pub fn compose(state: &GameState, camera: &Camera, viewport: &Viewport) -> Vec<DrawCommand> {
    let theme = Theme::for_level(state.scroll.level);
    let position = state.scroll.position;
    let horizon = position + state.config.draw_distance;

    let mut commands = vec![
        DrawCommand::Rect {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(viewport.width, viewport.horizon_y),
            color: theme.sky,
        },
        DrawCommand::Rect {
            min: Vec2::new(0.0, viewport.horizon_y),
            max: Vec2::new(viewport.width, viewport.height),
            color: theme.ground,
        },
    ];

    let segments = state.track.active_segments();
    let drift = DriftAccumulator::new(segments, position);

    // Geometry keyed by forward distance, sorted far-to-near below
    let mut keyed: Vec<(f32, DrawCommand)> = Vec::new();

    for segment in segments {
        let from = segment.start_distance.max(position);
        let to = segment.end_distance().min(horizon);
        let mut near = from;
        while near < to {
            let far = (near + ROW_STEP).min(to);
            if let Some(quad) = road_row(segment.width_at_start, near, far, position, &drift, camera, viewport) {
                // Alternate row shading as a motion cue
                let band = (near / ROW_STEP) as i64 % 2 == 0;
                let color = if band { theme.road } else { shade(theme.road, 0.82) };
                keyed.push((far - position, DrawCommand::Polygon { points: quad, color }));
            }
            near = far;
        }
    }

    for obstacle in state.track.active_obstacles() {
        if obstacle.distance < position || obstacle.distance > horizon {
            continue;
        }
        let rel = obstacle.distance - position;
        let Ok(center) = project(
            obstacle.lateral_offset,
            rel,
            drift.drift_at(obstacle.distance),
            camera,
            viewport,
        ) else {
            continue;
        };
        let half = OBSTACLE_HALF_SIZE * center.scale;
        let color = match obstacle.kind {
            ObstacleKind::Block => theme.obstacle,
            ObstacleKind::Hazard => theme.hazard,
        };
        let points = vec![
            Vec2::new(center.x - half, center.y),
            Vec2::new(center.x, center.y - half),
            Vec2::new(center.x + half, center.y),
            Vec2::new(center.x, center.y + half * 0.4),
        ];
        keyed.push((rel, DrawCommand::Polygon { points, color }));
    }

    // Back-to-front: farthest first
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    commands.extend(keyed.into_iter().map(|(_, command)| command));

    commands.push(ship(state, camera, viewport, theme));
    commands
}

/// One road quad between two forward distances
fn road_row(
    width: f32,
    near: f32,
    far: f32,
    position: f32,
    drift: &DriftAccumulator<'_>,
    camera: &Camera,
    viewport: &Viewport,
) -> Option<Vec<Vec2>> {
    let near_drift = drift.drift_at(near);
    let far_drift = drift.drift_at(far);
    let nl = project(-width, near - position, near_drift, camera, viewport).ok()?;
    let nr = project(width, near - position, near_drift, camera, viewport).ok()?;
    let fr = project(width, far - position, far_drift, camera, viewport).ok()?;
    let fl = project(-width, far - position, far_drift, camera, viewport).ok()?;
    Some(vec![
        Vec2::new(nl.x, nl.y),
        Vec2::new(nr.x, nr.y),
        Vec2::new(fr.x, fr.y),
        Vec2::new(fl.x, fl.y),
    ])
}

/// The player's ship: a triangle near the screen bottom, lifted along a
/// sine arc while airborne.
fn ship(state: &GameState, camera: &Camera, viewport: &Viewport, theme: &Theme) -> DrawCommand {
    let half_width = SHIP_HALF_WIDTH * viewport.width;
    let height = SHIP_HEIGHT * viewport.height;
    let base_y = viewport.height - SHIP_BASE_OFFSET * viewport.height;

    let x = viewport.center_x() + state.player.lateral_position * camera.lane_half_width
        - state.player.lateral_position * half_width;

    let lift = if state.player.is_airborne() && state.config.jump_duration > 0.0 {
        let progress = 1.0 - state.player.jump_timer / state.config.jump_duration;
        JUMP_LIFT * viewport.height * (progress * std::f32::consts::PI).sin()
    } else {
        0.0
    };
    let base_y = base_y - lift;

    DrawCommand::Polygon {
        points: vec![
            Vec2::new(x - half_width, base_y),
            Vec2::new(x, base_y - height),
            Vec2::new(x + half_width, base_y),
        ],
        color: theme.ship,
    }
}
