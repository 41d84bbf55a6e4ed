//! Fixed timestep simulation tick
//!
//! One tick per rendered frame: input -> scroll advance -> score ->
//! generation refill -> prune -> collision. The tick is atomic with
//! respect to external observation; pausing suspends between ticks with
//! no partial-tick state.

use super::collision::{CollisionVerdict, check_collision};
use super::state::{GameEvent, GamePhase, GameState};

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Steer left is held
    pub left_held: bool,
    /// Steer right is held
    pub right_held: bool,
    /// Pause was toggled this tick
    pub pause_pressed: bool,
    /// Menu confirm / acknowledge was pressed this tick
    pub confirm_pressed: bool,
    /// Jump was pressed this tick
    pub jump_pressed: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if input.confirm_pressed {
                state.start_run();
            }
            return;
        }
        GamePhase::Paused => {
            if input.pause_pressed {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::GameOver => {
            if input.confirm_pressed {
                let score = state.scroll.score;
                let level = state.scroll.level;
                state.push_event(GameEvent::GameOutcome { score, level });
                state.phase = GamePhase::Menu;
            }
            return;
        }
        GamePhase::Playing => {}
    }

    if input.pause_pressed {
        state.phase = GamePhase::Paused;
        return;
    }

    // Unrecoverable corruption ends the run instead of crashing the loop
    if state.scroll.is_corrupt() {
        log::error!(
            "scroll state corrupt (position={}, speed={}), forcing game over",
            state.scroll.position,
            state.scroll.speed
        );
        enter_game_over(state);
        return;
    }

    state.time_ticks += 1;

    let lateral_speed = state.config.lateral_speed;
    let distance_per_point = state.config.distance_per_point.max(f32::EPSILON);
    let draw_distance = state.config.draw_distance;
    let grace_score = state.config.collision_grace_score;
    let min_epsilon = state.config.min_collision_epsilon;
    let collision_threshold = state.config.collision_threshold;

    // Player input
    state.player.update_timers(dt);
    let direction = (input.right_held as i8 - input.left_held as i8) as f32;
    state.player.steer(direction, lateral_speed, dt);
    if input.jump_pressed {
        state.player.try_jump(&state.config);
    }

    // Forward progress
    state.scroll.advance(dt);

    // Score one point per distance unit; level crossings apply the speed
    // multiplier inside record_score_event, by level delta
    let units = (state.scroll.position / distance_per_point).floor() as u64;
    if units > state.scored_units {
        let delta = units - state.scored_units;
        state.scored_units = units;
        let crossings = state.scroll.record_score_event(delta);
        let level = state.scroll.level;
        for i in 0..crossings {
            state.push_event(GameEvent::LevelReached {
                level: level - crossings + i + 1,
            });
        }
    }

    // Keep the window buffered ahead of the camera, drop what fell behind
    let horizon = state.scroll.position + draw_distance;
    state.track.ensure_buffered(horizon, &state.scroll);
    state.track.prune(state.scroll.position);

    state.player.current_segment = state.track.segment_at(state.scroll.position).map(|s| s.id);

    // Collision: armed after the tutorial grace, bypassed while airborne.
    // Epsilon covers one frame's travel so high speed cannot tunnel.
    let armed = state.scroll.score >= grace_score && !state.player.is_airborne();
    if armed {
        let epsilon = (state.scroll.speed * dt).max(min_epsilon);
        let verdict = check_collision(
            &state.player,
            state.track.active_obstacles(),
            state.scroll.position,
            epsilon,
            collision_threshold,
        );
        if let CollisionVerdict::Hit(obstacle_id) = verdict {
            state.push_event(GameEvent::CollisionOccurred { obstacle_id });
            enter_game_over(state);
        }
    }
}

fn enter_game_over(state: &mut GameState) {
    if state.scroll.score > state.session_best {
        state.session_best = state.scroll.score;
        state.push_event(GameEvent::NewHighScore {
            score: state.scroll.score,
        });
    }
    state.phase = GamePhase::GameOver;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Config;

    fn playing_state(config: Config) -> GameState {
        let mut state = GameState::new(12345, config);
        tick(
            &mut state,
            &TickInput {
                confirm_pressed: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    /// Config that makes a collision inevitable: level up immediately,
    /// obstacles everywhere, no grace period.
    fn deathtrap_config() -> Config {
        Config {
            score_units_per_level: 1,
            obstacle_density_base: 1.0,
            obstacle_density_slope: 0.0,
            obstacle_density_cap: 1.0,
            collision_grace_score: 0,
            reaction_window: 0.0,
            speed_growth_per_level: 0.0,
            ..Config::default()
        }
    }

    #[test]
    fn test_menu_to_playing_on_confirm() {
        let mut state = GameState::new(1, Config::default());
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.scroll.position, 0.0);

        let mut state = playing_state(Config::default());
        assert!(state.drain_events().contains(&GameEvent::GameStarted));
    }

    #[test]
    fn test_pause_resume() {
        let mut state = playing_state(Config::default());
        let pause = TickInput {
            pause_pressed: true,
            ..Default::default()
        };

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let position = state.scroll.position;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.scroll.position, position);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_position_advances_only_while_playing() {
        let mut state = playing_state(Config::default());
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.scroll.position > 0.0);
    }

    #[test]
    fn test_level_crossing_emits_event_and_speeds_up() {
        let mut state = playing_state(Config::default());
        let initial_speed = state.scroll.speed;
        state.drain_events();

        let mut events = Vec::new();
        for _ in 0..20_000 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            events.extend(state.drain_events());
            if state.scroll.level >= 1 {
                break;
            }
        }
        assert_eq!(state.scroll.level, 1);
        assert!(events.contains(&GameEvent::LevelReached { level: 1 }));
        assert!((state.scroll.speed - initial_speed * 1.08).abs() < 1e-3);
        assert_eq!(state.scroll.theme_index(), 1);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut state = playing_state(deathtrap_config());
        state.drain_events();

        let mut events = Vec::new();
        for _ in 0..100_000 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            events.extend(state.drain_events());
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::CollisionOccurred { .. }))
        );
        // Score beat the (zero) session best
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
    }

    #[test]
    fn test_airborne_player_passes_obstacles() {
        let mut config = deathtrap_config();
        // One jump outlasts the whole test
        config.jump_duration = 1e9;
        config.jump_cooldown = 0.0;
        let mut state = playing_state(config);

        let jump = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        for _ in 0..5_000 {
            tick(&mut state, &jump, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_acknowledge_returns_to_menu() {
        let mut state = playing_state(deathtrap_config());
        for _ in 0..100_000 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        let final_score = state.scroll.score;
        state.drain_events();

        tick(
            &mut state,
            &TickInput {
                confirm_pressed: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, GamePhase::Menu);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::GameOutcome { score, .. } if *score == final_score
        )));
    }

    #[test]
    fn test_restart_regenerates_from_zero() {
        let mut state = playing_state(deathtrap_config());
        for _ in 0..100_000 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        let confirm = TickInput {
            confirm_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &confirm, SIM_DT);
        tick(&mut state, &confirm, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.scroll.position, 0.0);
        assert_eq!(state.scroll.score, 0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.track.active_segments()[0].id, 0);
    }

    #[test]
    fn test_corrupt_state_forces_game_over() {
        let mut state = playing_state(Config::default());
        state.scroll.position = f32::NAN;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_steering_respects_clamp() {
        let mut state = playing_state(Config::default());
        let right = TickInput {
            right_held: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &right, SIM_DT);
            if state.phase != GamePhase::Playing {
                return; // hit something while hugging the edge; clamp held until then
            }
            assert!(state.player.lateral_position <= 1.0);
        }
        assert_eq!(state.player.lateral_position, 1.0);
    }

    #[test]
    fn test_determinism() {
        let config = Config::default();
        let mut a = GameState::new(777, config.clone());
        let mut b = GameState::new(777, config);

        let inputs = [
            TickInput {
                confirm_pressed: true,
                ..Default::default()
            },
            TickInput {
                left_held: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                right_held: true,
                jump_pressed: true,
                ..Default::default()
            },
        ];
        for input in &inputs {
            for _ in 0..200 {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.scroll.score, b.scroll.score);
        assert_eq!(a.scroll.position, b.scroll.position);
        assert_eq!(
            a.track.active_segments().len(),
            b.track.active_segments().len()
        );
        assert_eq!(a.player.lateral_position, b.player.lateral_position);
    }
}
