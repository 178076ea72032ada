//! Native driver
//!
//! There is no window on native: frames go to a [`RecordingSurface`] and are
//! summarised in the log. Without a keyboard the ship only moves when the
//! autopilot flies it.

use std::thread;
use std::time::{Duration, Instant};

use super::Game;
use crate::audio::{AudioManager, LogBackend};
use crate::renderer::{DrawCommand, RecordingSurface};
use crate::settings::Settings;
use crate::sim::{Arena, Simulation, TickOutcome};

/// How a native run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: u32,
    pub game_over: bool,
    pub collisions: u64,
}

/// Build the game described by `settings` with the given seed
pub fn new_game(settings: &Settings, seed: u64) -> Game<RecordingSurface> {
    let arena = Arena::new(settings.arena_width, settings.arena_height);
    let sim = Simulation::with_default_scene(arena, seed, settings.keys.clone());
    let audio = AudioManager::new(Box::new(LogBackend));
    Game::new(sim, RecordingSurface::new(), audio, settings)
}

/// Tick once and log a summary of the recorded frame
fn step_and_log(game: &mut Game<RecordingSurface>) -> TickOutcome {
    let outcome = game.step();
    let frame = game.surface.take();
    if log::log_enabled!(log::Level::Trace) {
        let sprites = frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count();
        let texts: Vec<&str> = frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        log::trace!("tick {}: {} sprites, {:?}", game.sim.time_ticks, sprites, texts);
    }
    outcome
}

/// Tick until the run halts or `max_ticks` is reached, without sleeping
pub fn run_unpaced(game: &mut Game<RecordingSurface>, max_ticks: Option<u64>) -> RunSummary {
    loop {
        if max_ticks.is_some_and(|max| game.sim.time_ticks >= max) {
            break;
        }
        if step_and_log(game) == TickOutcome::Halt {
            break;
        }
    }
    summarize(game)
}

/// Tick on a fixed-rate timer until the run halts or hits the tick limit
pub fn run(settings: &Settings, seed: u64) -> RunSummary {
    let mut game = new_game(settings, seed);
    let period = Duration::from_millis(settings.tick_interval_ms());
    if !game.autopilot {
        log::warn!("No keyboard on native - set \"autopilot\": true to fly the ship");
    }

    let mut next = Instant::now();
    loop {
        if settings
            .max_ticks
            .is_some_and(|max| game.sim.time_ticks >= max)
        {
            log::info!("Tick limit reached");
            break;
        }
        if step_and_log(&mut game) == TickOutcome::Halt {
            break;
        }

        // Fixed rate, no catch-up: a late tick just pushes the schedule back
        next += period;
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
        } else {
            next = now;
        }
    }

    summarize(&game)
}

fn summarize(game: &Game<RecordingSurface>) -> RunSummary {
    let summary = RunSummary {
        ticks: game.sim.time_ticks,
        score: game.sim.score().unwrap_or(0),
        game_over: game.sim.is_over(),
        collisions: game.collisions,
    };
    if let Ok(json) = serde_json::to_string(&game.sim.snapshot()) {
        log::debug!("final state: {}", json);
    }
    summary
}
