//! Draw commands emitted to the display collaborator

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, components in [0, 1]
pub type Color = [f32; 4];

/// One drawing instruction. List order is z-order: later commands paint
/// over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Axis-aligned filled rectangle (backdrop fills)
    Rect { min: Vec2, max: Vec2, color: Color },
    /// Filled convex polygon, vertices in winding order
    Polygon { points: Vec<Vec2>, color: Color },
}

/// Darken or brighten a color, leaving alpha untouched
pub fn shade(color: Color, factor: f32) -> Color {
    [
        (color[0] * factor).clamp(0.0, 1.0),
        (color[1] * factor).clamp(0.0, 1.0),
        (color[2] * factor).clamp(0.0, 1.0),
        color[3],
    ]
}
