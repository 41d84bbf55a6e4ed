//! Collision detection
//!
//! Collision is a lane-overlap test inside a near-field window around the
//! player's forward position. The window must be at least one frame's
//! travel wide or a fast frame can step clean over an obstacle; the tick
//! sizes epsilon accordingly.

use super::state::PlayerState;
use super::track::Obstacle;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionVerdict {
    None,
    /// Hit the obstacle with this id
    Hit(u64),
}

impl CollisionVerdict {
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, CollisionVerdict::Hit(_))
    }
}

/// Test the player against all obstacles within `[distance - epsilon,
/// distance + epsilon]`. Lateral overlap below `threshold` is a hit; when
/// several obstacles qualify in the same tick, the lowest id wins so the
/// verdict is deterministic.
pub fn check_collision(
    player: &PlayerState,
    obstacles: &[Obstacle],
    player_distance: f32,
    epsilon: f32,
    threshold: f32,
) -> CollisionVerdict {
    let mut hit: Option<u64> = None;
    for obstacle in obstacles {
        if (obstacle.distance - player_distance).abs() > epsilon {
            continue;
        }
        if (player.lateral_position - obstacle.lateral_offset).abs() < threshold {
            hit = Some(match hit {
                Some(id) => id.min(obstacle.id),
                None => obstacle.id,
            });
        }
    }
    match hit {
        Some(id) => CollisionVerdict::Hit(id),
        None => CollisionVerdict::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::track::ObstacleKind;

    fn obstacle(id: u64, distance: f32, lateral_offset: f32) -> Obstacle {
        Obstacle {
            id,
            distance,
            lateral_offset,
            kind: ObstacleKind::Block,
        }
    }

    fn player_at(lateral: f32) -> PlayerState {
        PlayerState {
            lateral_position: lateral,
            ..PlayerState::default()
        }
    }

    #[test]
    fn test_near_miss_is_none() {
        let obstacles = [obstacle(0, 10.0, 0.5)];
        let verdict = check_collision(&player_at(0.0), &obstacles, 10.0, 1.0, 0.1);
        assert_eq!(verdict, CollisionVerdict::None);
    }

    #[test]
    fn test_overlap_within_threshold_hits() {
        // Player at 0.0, obstacle at 0.05, threshold 0.1 -> HIT
        let obstacles = [obstacle(4, 10.0, 0.05)];
        let verdict = check_collision(&player_at(0.0), &obstacles, 10.0, 1.0, 0.1);
        assert_eq!(verdict, CollisionVerdict::Hit(4));
    }

    #[test]
    fn test_exact_threshold_is_none() {
        let obstacles = [obstacle(0, 10.0, 0.1)];
        let verdict = check_collision(&player_at(0.0), &obstacles, 10.0, 1.0, 0.1);
        assert_eq!(verdict, CollisionVerdict::None);
    }

    #[test]
    fn test_outside_window_ignored() {
        let obstacles = [obstacle(0, 20.0, 0.0)];
        let verdict = check_collision(&player_at(0.0), &obstacles, 10.0, 1.0, 0.1);
        assert_eq!(verdict, CollisionVerdict::None);
    }

    #[test]
    fn test_window_catches_passed_obstacle() {
        // Obstacle crossed during the frame still falls inside epsilon
        let obstacles = [obstacle(0, 10.0, 0.0)];
        let verdict = check_collision(&player_at(0.0), &obstacles, 10.5, 0.75, 0.1);
        assert_eq!(verdict, CollisionVerdict::Hit(0));
    }

    #[test]
    fn test_lowest_id_wins() {
        let obstacles = [
            obstacle(7, 10.2, 0.02),
            obstacle(3, 10.0, 0.05),
            obstacle(9, 9.8, -0.01),
        ];
        let verdict = check_collision(&player_at(0.0), &obstacles, 10.0, 1.0, 0.1);
        assert_eq!(verdict, CollisionVerdict::Hit(3));
    }
}
