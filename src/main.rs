//! Starlane entry point
//!
//! Headless demo shell: runs the full tick -> compose pipeline with a
//! simple autopilot until the run ends, then persists the score. A
//! windowed front end would replace the autopilot with real input and feed
//! the draw list to a display.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use starlane::audio::{self, LogSink};
use starlane::consts::SIM_DT;
use starlane::render::compose;
use starlane::sim::projection::{Camera, Viewport};
use starlane::sim::state::{GamePhase, GameState};
use starlane::sim::tick::{TickInput, tick};
use starlane::{Config, HighScores};

const CONFIG_PATH: &str = "starlane.json";
const SCORES_PATH: &str = "highscores.json";
/// Demo budget: ten minutes of simulated time
const MAX_TICKS: u64 = 10 * 60 * 60;

fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

fn main() {
    env_logger::init();
    log::info!("Starlane (headless demo) starting...");

    let config = Config::load(Path::new(CONFIG_PATH));
    let mut highscores = HighScores::load_or_default(Path::new(SCORES_PATH));

    let seed = now_ms() as u64;
    let mut state = GameState::new(seed, config);
    state.set_session_best(highscores.top_score().unwrap_or(0));
    log::info!("seed {seed}, difficulty {}", state.config.difficulty.as_str());

    let camera = Camera::from_config(&state.config);
    let viewport = Viewport::default();
    let mut sink = LogSink;

    // Leave the menu
    tick(
        &mut state,
        &TickInput {
            confirm_pressed: true,
            ..Default::default()
        },
        SIM_DT,
    );

    let mut last_phase = state.phase;
    let mut frame_commands = 0usize;

    for _ in 0..MAX_TICKS {
        let input = autopilot(&state);
        tick(&mut state, &input, SIM_DT);

        let events = state.drain_events();
        audio::dispatch(&events, &mut sink);

        let frame = compose(&state, &camera, &viewport);
        frame_commands = frame.len();

        // Persist only on the Playing -> GameOver transition, and only a
        // qualifying score
        if state.phase == GamePhase::GameOver && last_phase == GamePhase::Playing {
            let score = state.scroll.score;
            if highscores.qualifies(score) {
                highscores.add_score(score, state.scroll.level, now_ms());
                if let Err(e) = highscores.save(Path::new(SCORES_PATH)) {
                    log::warn!("{e}; score kept in memory only");
                }
            }
            break;
        }
        last_phase = state.phase;
    }

    println!(
        "run over: score {} at level {} after {} ticks ({} draw commands in the last frame)",
        state.scroll.score, state.scroll.level, state.time_ticks, frame_commands,
    );
    if let Some(best) = highscores.top_score() {
        println!("best on record: {best}");
    }
}

/// Demo steering: dodge the nearest threatening obstacle, drift back to
/// center otherwise, jump when a dodge won't land in time.
fn autopilot(state: &GameState) -> TickInput {
    let position = state.scroll.position;
    let lookahead = state.scroll.speed; // one second ahead
    let dodge_margin = state.config.collision_threshold + 0.15;

    let mut input = TickInput::default();

    let threat = state.track.active_obstacles().iter().find(|o| {
        o.distance > position
            && o.distance - position < lookahead
            && (o.lateral_offset - state.player.lateral_position).abs() < dodge_margin
    });

    match threat {
        Some(obstacle) => {
            if obstacle.lateral_offset >= state.player.lateral_position {
                input.left_held = true;
            } else {
                input.right_held = true;
            }
            // Too close to steer clear: jump over it
            if obstacle.distance - position < state.scroll.speed * 0.25 {
                input.jump_pressed = true;
            }
        }
        None => {
            // Recenter for the widest dodge options
            if state.player.lateral_position > 0.05 {
                input.left_held = true;
            } else if state.player.lateral_position < -0.05 {
                input.right_held = true;
            }
        }
    }

    input
}
