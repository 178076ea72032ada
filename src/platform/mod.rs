//! Platform drivers
//!
//! Each driver owns a [`Game`]: the bundle of
//! simulation, surface and audio, feeds it input and calls `sim::tick` on a
//! fixed-rate timer until the run halts:
//! - `native`: sleep-paced loop drawing into a recording surface
//! - `web`: `setInterval` callback drawing onto a 2D canvas

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::audio::AudioManager;
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::{Simulation, TickOutcome, autopilot, tick};

/// Everything one running game needs between ticks
pub struct Game<S: Surface> {
    pub sim: Simulation,
    pub surface: S,
    pub audio: AudioManager,
    pub autopilot: bool,
    /// Collision events drained from the bus so far
    pub collisions: u64,
}

impl<S: Surface> Game<S> {
    pub fn new(sim: Simulation, surface: S, audio: AudioManager, settings: &Settings) -> Self {
        let mut audio = audio;
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        Self {
            sim,
            surface,
            audio,
            autopilot: settings.autopilot,
            collisions: 0,
        }
    }

    /// Run one tick, letting the autopilot drive first when enabled
    pub fn step(&mut self) -> TickOutcome {
        if self.autopilot {
            let cmd = autopilot::decide(&self.sim);
            cmd.apply(self.sim.input_mut());
        }
        let outcome = tick(&mut self.sim, &mut self.surface, &self.audio);
        self.collisions += self.sim.bus.take_events().len() as u64;
        outcome
    }

    pub fn toggle_autopilot(&mut self) {
        self.autopilot = !self.autopilot;
        if !self.autopilot {
            self.sim.input_mut().clear();
        }
        log::info!("Autopilot: {}", self.autopilot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use crate::sim::{Arena, Entity};
    use glam::Vec2;

    #[test]
    fn test_autopilot_toggle_releases_keys() {
        let settings = Settings {
            autopilot: true,
            ..Default::default()
        };
        let sim = Simulation::with_default_scene(Arena::new(800.0, 600.0), 3, settings.keys.clone());
        let mut game = Game::new(sim, RecordingSurface::new(), AudioManager::silent(), &settings);
        game.sim.input_mut().set_fire(true);
        game.toggle_autopilot();
        assert!(!game.autopilot);
        assert!(!game.sim.input.fire_held());
    }

    #[test]
    fn test_settings_reach_audio() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let sim = Simulation::new(Arena::new(800.0, 600.0), 3);
        let game = Game::new(sim, RecordingSurface::new(), AudioManager::silent(), &settings);
        assert_eq!(game.audio.effective_volume(), 0.0);
    }

    #[test]
    fn test_step_drains_collision_log() {
        let settings = Settings::default();
        let mut sim = Simulation::new(Arena::new(800.0, 600.0), 3);
        let sprites = sim.sprites;
        for pos in [Vec2::new(200.0, 200.0), Vec2::new(205.0, 200.0)] {
            let id = sim.next_entity_id();
            sim.spawn(Entity::asteroid(id, pos, sprites.asteroid, Vec2::ZERO));
        }
        let mut game = Game::new(sim, RecordingSurface::new(), AudioManager::silent(), &settings);

        game.step();
        assert_eq!(game.collisions, 1);
        assert!(game.sim.bus.published().is_empty());

        game.step();
        assert_eq!(game.collisions, 1);
    }
}
