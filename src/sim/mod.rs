//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod projection;
pub mod scroll;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::{CollisionVerdict, check_collision};
pub use projection::{Camera, DriftAccumulator, ProjectedPoint, Viewport, project};
pub use scroll::ScrollState;
pub use state::{GameEvent, GamePhase, GameState, PlayerState};
pub use tick::{TickInput, tick};
pub use track::{Obstacle, ObstacleKind, TrackGenerator, TrackSegment};
