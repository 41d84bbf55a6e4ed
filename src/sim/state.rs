//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use super::scroll::ScrollState;
use super::track::TrackGenerator;
use crate::settings::Config;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu, nothing scrolls
    Menu,
    /// Active gameplay
    Playing,
    /// Suspended between ticks, no partial-tick state
    Paused,
    /// Run ended
    GameOver,
}

/// Discrete events emitted by the simulation, drained once per tick by the
/// shell (audio, persistence). Fire-and-forget: nothing feeds back into
/// core state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new run started
    GameStarted,
    /// Score crossed a level boundary
    LevelReached { level: u32 },
    /// The player hit an obstacle
    CollisionOccurred { obstacle_id: u64 },
    /// Score beat the session best (emitted entering game over)
    NewHighScore { score: u64 },
    /// Final score of an acknowledged run (candidate for persistence)
    GameOutcome { score: u64, level: u32 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Lane offset, always clamped to [-1, 1]
    pub lateral_position: f32,
    /// Segment under the ship (lookup only, no ownership)
    pub current_segment: Option<u64>,
    /// Seconds of airtime remaining; airborne while > 0
    pub jump_timer: f32,
    /// Seconds before the next jump is allowed
    pub jump_cooldown: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            lateral_position: 0.0,
            current_segment: None,
            jump_timer: 0.0,
            jump_cooldown: 0.0,
        }
    }
}

impl PlayerState {
    /// Airborne ships pass over obstacles
    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.jump_timer > 0.0
    }

    /// Steer laterally; `direction` is -1, 0 or +1
    pub fn steer(&mut self, direction: f32, lateral_speed: f32, dt: f32) {
        self.lateral_position =
            (self.lateral_position + direction * lateral_speed * dt).clamp(-1.0, 1.0);
    }

    /// Start a jump if allowed. Returns whether the jump started.
    pub fn try_jump(&mut self, config: &Config) -> bool {
        if self.is_airborne() || self.jump_cooldown > 0.0 {
            return false;
        }
        self.jump_timer = config.jump_duration;
        self.jump_cooldown = config.jump_duration + config.jump_cooldown;
        true
    }

    /// Advance jump and cooldown timers
    pub fn update_timers(&mut self, dt: f32) {
        if self.jump_timer > 0.0 {
            self.jump_timer = (self.jump_timer - dt).max(0.0);
        }
        if self.jump_cooldown > 0.0 {
            self.jump_cooldown = (self.jump_cooldown - dt).max(0.0);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete game state for one session
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub player: PlayerState,
    pub scroll: ScrollState,
    pub track: TrackGenerator,
    pub config: Config,
    /// Best score seen this session (seeded from the loaded leaderboard)
    pub session_best: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Points already credited for distance traveled
    pub scored_units: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, config: Config) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            player: PlayerState::default(),
            scroll: ScrollState::new(&config),
            track: TrackGenerator::new(seed, &config),
            config,
            session_best: 0,
            time_ticks: 0,
            scored_units: 0,
            events: Vec::new(),
        }
    }

    /// Seed the session best from an external leaderboard
    pub fn set_session_best(&mut self, best: u64) {
        self.session_best = best;
    }

    /// Begin a fresh run: scroll, track and player all return to initial
    /// values, generation restarts from segment id 0.
    pub fn start_run(&mut self) {
        self.scroll.reset();
        self.track.reset();
        self.player.reset();
        self.scored_units = 0;
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::GameStarted);
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
