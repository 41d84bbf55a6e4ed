//! Color themes
//!
//! Exactly four themes, cycled one per level: theme = level % 4.

use super::command::Color;

/// A color theme for one difficulty level
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: &'static str,
    pub sky: Color,
    pub ground: Color,
    pub road: Color,
    pub obstacle: Color,
    pub hazard: Color,
    pub ship: Color,
}

/// Purple ship on every theme
const SHIP: Color = [0.70, 0.0, 1.0, 1.0];

pub static THEMES: [Theme; 4] = [
    Theme {
        name: "asphalt",
        sky: [0.02, 0.02, 0.06, 1.0],
        ground: [0.05, 0.05, 0.08, 1.0],
        road: [0.67, 0.67, 0.67, 1.0],
        obstacle: [1.0, 0.0, 0.0, 1.0],
        hazard: [1.0, 0.4, 0.0, 1.0],
        ship: SHIP,
    },
    Theme {
        name: "amber",
        sky: [0.05, 0.02, 0.0, 1.0],
        ground: [0.09, 0.05, 0.01, 1.0],
        road: [1.0, 0.8, 0.0, 1.0],
        obstacle: [1.0, 0.0, 0.0, 1.0],
        hazard: [0.85, 0.1, 0.5, 1.0],
        ship: SHIP,
    },
    Theme {
        name: "mint",
        sky: [0.0, 0.05, 0.03, 1.0],
        ground: [0.01, 0.08, 0.05, 1.0],
        road: [0.0, 1.0, 0.6, 1.0],
        obstacle: [1.0, 0.0, 0.0, 1.0],
        hazard: [1.0, 0.3, 0.1, 1.0],
        ship: SHIP,
    },
    Theme {
        name: "ice",
        sky: [0.0, 0.03, 0.06, 1.0],
        ground: [0.01, 0.05, 0.09, 1.0],
        road: [0.0, 0.8, 1.0, 1.0],
        obstacle: [1.0, 0.0, 0.0, 1.0],
        hazard: [1.0, 0.25, 0.4, 1.0],
        ship: SHIP,
    },
];

impl Theme {
    /// Theme for a difficulty level (cycles through all four)
    #[inline]
    pub fn for_level(level: u32) -> &'static Theme {
        &THEMES[(level % 4) as usize]
    }
}
