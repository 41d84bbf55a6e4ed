//! Audio collaborator interface
//!
//! The core emits discrete [`GameEvent`]s; a sink maps them to sound
//! effects fire-and-forget. Nothing returns to the simulation.

use crate::sim::state::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// New run begins
    Begin,
    /// Score crossed a level boundary
    LevelUp,
    /// Ship hit an obstacle
    Impact,
    /// New personal best
    HighScoreFanfare,
    /// Run acknowledged, back to the menu
    MenuReturn,
}

/// Map a game event to the effect it should trigger, if any
pub fn effect_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::GameStarted => Some(SoundEffect::Begin),
        GameEvent::LevelReached { .. } => Some(SoundEffect::LevelUp),
        GameEvent::CollisionOccurred { .. } => Some(SoundEffect::Impact),
        GameEvent::NewHighScore { .. } => Some(SoundEffect::HighScoreFanfare),
        GameEvent::GameOutcome { .. } => Some(SoundEffect::MenuReturn),
    }
}

/// A fire-and-forget audio playback sink
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Sink that only logs; used headless and in tests
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sfx: {effect:?}");
    }
}

/// Route a tick's drained events to a sink
pub fn dispatch(events: &[GameEvent], sink: &mut dyn AudioSink) {
    for event in events {
        if let Some(effect) = effect_for(event) {
            sink.play(effect);
        }
    }
}
