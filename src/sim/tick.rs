//! Fixed-cadence simulation tick
//!
//! One tick: update every entity, run the collision pass, draw entities, then
//! draw and clear queued HUD text. Movement is per tick, not per second, so
//! the driver's timer period sets the game speed.

use glam::Vec2;

use super::collision::detect_collisions;
use super::context::TickContext;
use super::state::{GamePhase, Simulation};
use crate::audio::AudioManager;
use crate::renderer::{Font, Surface};

pub const GAME_OVER_TEXT: &str = "GAME OVER";

/// What the driver should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep the timer running
    Continue,
    /// Run is over; cancel the timer
    Halt,
}

/// Advance the simulation by one tick and draw the frame
pub fn tick(sim: &mut Simulation, surface: &mut dyn Surface, audio: &AudioManager) -> TickOutcome {
    match sim.phase {
        GamePhase::Over => return TickOutcome::Halt,
        GamePhase::Running if sim.is_over() => {
            sim.phase = GamePhase::Over;
            log::info!(
                "Game over after {} ticks, score {}",
                sim.time_ticks,
                sim.score().unwrap_or(0)
            );
            surface.set_font(Font::BANNER);
            surface.draw_text(GAME_OVER_TEXT, banner_position(sim));
            return TickOutcome::Halt;
        }
        GamePhase::Running => {}
    }

    sim.time_ticks += 1;
    update_entities(sim, audio);
    detect_collisions(sim, audio);
    draw_entities(sim, surface);
    draw_ui_text(sim, surface);

    TickOutcome::Continue
}

/// Update every entity in collection order.
///
/// Spawns are appended immediately and get visited later in the same pass.
/// A self-removal shifts the rest of the collection down while the cursor
/// still advances, so the entity sliding into the freed slot sits this tick out.
pub fn update_entities(sim: &mut Simulation, audio: &AudioManager) {
    let mut i = 0;
    while i < sim.entities.len() {
        let mut ctx = TickContext::new(
            sim.arena,
            &sim.sprites,
            &sim.input,
            &mut sim.rng,
            audio,
            &mut sim.ui_text,
            &mut sim.next_id,
        );
        let entity = &mut sim.entities[i];
        entity.update(&mut ctx);
        let id = entity.id;

        let (spawned, destroy_self) = ctx.finish();
        for new_entity in spawned {
            sim.spawn(new_entity);
        }
        if destroy_self {
            log::trace!("{:?} left the arena", id);
            sim.remove(id);
        }
        i += 1;
    }
}

fn draw_entities(sim: &Simulation, surface: &mut dyn Surface) {
    for entity in &sim.entities {
        if let Some(sprite) = &entity.sprite {
            surface.draw_sprite(sprite, entity.pos, entity.rotation);
        }
    }
}

fn draw_ui_text(sim: &mut Simulation, surface: &mut dyn Surface) {
    surface.set_font(Font::HUD);
    for request in sim.ui_text.drain(..) {
        surface.draw_text(&request.text, request.pos);
    }
}

/// Centre of the arena, where the game over banner goes
pub fn banner_position(sim: &Simulation) -> Vec2 {
    sim.arena.center()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteKind;
    use crate::audio::{RecordingBackend, SoundEffect};
    use crate::input::KeyEvent;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::settings::KeyBindings;
    use crate::sim::entity::{Arena, Entity, EntityId};

    fn run(sim: &mut Simulation, ticks: usize, surface: &mut RecordingSurface) {
        let audio = AudioManager::silent();
        for _ in 0..ticks {
            tick(sim, surface, &audio);
        }
    }

    fn missiles(sim: &Simulation) -> usize {
        sim.entities.iter().filter(|e| e.is_missile()).count()
    }

    fn add_player(sim: &mut Simulation) -> EntityId {
        let id = sim.next_entity_id();
        let center = sim.arena.center();
        sim.spawn(Entity::player(id, center, sim.sprites.player))
    }

    #[test]
    fn test_fire_cooldown_allows_one_shot_per_sixteen_ticks() {
        // Wide arena and sideways aim keep the first missile in bounds
        let mut sim = Simulation::new(Arena::new(1600.0, 600.0), 1);
        let player = add_player(&mut sim);
        sim.entities.iter_mut().find(|e| e.id == player).unwrap().rotation = 90.0;
        sim.input.handle_key(&KeyEvent::down("Space"));

        let backend = RecordingBackend::new();
        let audio = AudioManager::new(Box::new(backend.clone()));
        let mut surface = RecordingSurface::new();

        for _ in 0..16 {
            tick(&mut sim, &mut surface, &audio);
        }
        assert_eq!(missiles(&sim), 1);
        assert_eq!(backend.count(SoundEffect::Fire), 1);

        tick(&mut sim, &mut surface, &audio);
        assert_eq!(missiles(&sim), 2);
        assert_eq!(backend.count(SoundEffect::Fire), 2);
    }

    #[test]
    fn test_missile_spawns_at_muzzle_and_moves_same_tick() {
        let mut sim = Simulation::new(Arena::new(800.0, 600.0), 1);
        add_player(&mut sim);
        sim.input.handle_key(&KeyEvent::down("Space"));
        let mut surface = RecordingSurface::new();
        run(&mut sim, 1, &mut surface);

        let missile = sim.entities.iter().find(|e| e.is_missile()).unwrap();
        // Muzzle at (400, 268), then one move of (0, -3.2) * 7.5 px
        assert!((missile.pos.x - 400.0).abs() < 1e-3);
        assert!((missile.pos.y - 244.0).abs() < 1e-3);
    }

    #[test]
    fn test_rotate_left_wins_when_both_held() {
        let mut sim = Simulation::new(Arena::new(800.0, 600.0), 1);
        let player = add_player(&mut sim);
        sim.input.handle_key(&KeyEvent::down("KeyQ"));
        sim.input.handle_key(&KeyEvent::down("KeyE"));
        let mut surface = RecordingSurface::new();
        run(&mut sim, 3, &mut surface);
        assert_eq!(sim.entity(player).unwrap().rotation, -6.0);
    }

    #[test]
    fn test_player_moves_by_axes_and_stays_inside() {
        let mut sim = Simulation::new(Arena::new(800.0, 600.0), 1);
        let player = add_player(&mut sim);
        sim.input.handle_key(&KeyEvent::down("ArrowRight"));
        let mut surface = RecordingSurface::new();
        run(&mut sim, 1, &mut surface);
        assert_eq!(sim.entity(player).unwrap().pos, Vec2::new(407.5, 300.0));

        run(&mut sim, 200, &mut surface);
        assert_eq!(sim.entity(player).unwrap().pos.x, 800.0);
    }

    #[test]
    fn test_asteroid_leaves_shortly_after_crossing_margin() {
        let arena = Arena::new(800.0, 600.0);
        let mut sim = Simulation::new(arena, 1);
        let velocity = Vec2::new(2.0 * 600.0 / 160.0 * 0.1, 600.0 / 160.0 * 0.1);
        let per_tick = velocity.x * arena.move_scale();
        let id = sim.next_entity_id();
        sim.spawn(Entity::asteroid(id, Vec2::new(799.0, 100.0), sim.sprites.asteroid, velocity));

        let audio = AudioManager::silent();
        let mut surface = RecordingSurface::new();
        let mut ticks = 0;
        while sim.entity(id).is_some() {
            tick(&mut sim, &mut surface, &audio);
            ticks += 1;
            assert!(ticks < 100, "asteroid never left");
        }
        let bound = ((810.0 - 799.0) / per_tick).ceil() as usize + 1;
        assert!(ticks <= bound, "took {} ticks, bound {}", ticks, bound);
    }

    #[test]
    fn test_missile_leaves_shortly_after_crossing_margin() {
        let arena = Arena::new(800.0, 600.0);
        let mut sim = Simulation::new(arena, 1);
        let velocity = Vec2::new(1.0, 0.0);
        let per_tick = velocity.x * arena.move_scale();
        let id = sim.next_entity_id();
        sim.spawn(Entity::missile(id, Vec2::new(799.0, 100.0), sim.sprites.missile, 90.0, velocity));

        let audio = AudioManager::silent();
        let mut surface = RecordingSurface::new();
        let mut ticks = 0;
        while sim.entity(id).is_some() {
            tick(&mut sim, &mut surface, &audio);
            ticks += 1;
            assert!(ticks < 100, "missile never left");
        }
        let bound = ((810.0 - 799.0) / per_tick).ceil() as usize + 1;
        assert!(ticks <= bound, "took {} ticks, bound {}", ticks, bound);
        assert_eq!(missiles(&sim), 0);
    }

    #[test]
    fn test_player_hit_halts_on_next_tick() {
        let mut sim = Simulation::with_default_scene(Arena::new(800.0, 600.0), 1, KeyBindings::default());
        let center = sim.arena.center();
        let id = sim.next_entity_id();
        sim.spawn(Entity::asteroid(id, center, sim.sprites.asteroid, Vec2::ZERO));

        let audio = AudioManager::silent();
        let mut surface = RecordingSurface::new();
        assert_eq!(tick(&mut sim, &mut surface, &audio), TickOutcome::Continue);
        assert!(sim.is_over());
        assert_eq!(sim.phase, GamePhase::Running);
        assert!(sim.player().is_none());

        surface.clear();
        let ticks_before = sim.time_ticks;
        assert_eq!(tick(&mut sim, &mut surface, &audio), TickOutcome::Halt);
        assert_eq!(sim.phase, GamePhase::Over);
        assert_eq!(surface.texts(), vec![GAME_OVER_TEXT]);
        assert!(surface.sprites().is_empty());
        match &surface.commands()[0] {
            DrawCommand::Text { font, pos, .. } => {
                assert_eq!(*font, Font::BANNER);
                assert_eq!(*pos, banner_position(&sim));
            }
            other => panic!("unexpected {:?}", other),
        }

        surface.clear();
        let entities = sim.entities.clone();
        assert_eq!(tick(&mut sim, &mut surface, &audio), TickOutcome::Halt);
        assert!(surface.commands().is_empty());
        assert_eq!(sim.entities, entities);
        assert_eq!(sim.time_ticks, ticks_before);
    }

    #[test]
    fn test_frame_draws_background_first_then_score() {
        let mut sim = Simulation::with_default_scene(Arena::new(800.0, 600.0), 4, KeyBindings::default());
        let mut surface = RecordingSurface::new();
        run(&mut sim, 1, &mut surface);

        let sprites = surface.sprites();
        assert_eq!(sprites[0], SpriteKind::Background);
        assert_eq!(sprites[1], SpriteKind::Player);
        assert_eq!(surface.texts(), vec!["Score: 0"]);
        assert!(matches!(surface.commands().last(), Some(DrawCommand::Text { .. })));
        assert!(sim.ui_text.is_empty());
    }

    #[test]
    fn test_spawned_entity_updates_in_same_tick() {
        // A missile spawned by the player is appended and moved before the tick ends
        let mut sim = Simulation::new(Arena::new(800.0, 600.0), 1);
        add_player(&mut sim);
        sim.input.set_fire(true);
        let mut surface = RecordingSurface::new();
        run(&mut sim, 1, &mut surface);
        let missile = sim.entities.iter().find(|e| e.is_missile()).unwrap();
        assert!(missile.pos.y < 268.0);
    }

    #[test]
    fn test_self_removal_skips_the_next_entity_this_tick() {
        let arena = Arena::new(800.0, 600.0);
        let mut sim = Simulation::new(arena, 1);
        let v = Vec2::new(1.0, 1.0);
        let gone = sim.next_entity_id();
        sim.spawn(Entity::asteroid(gone, Vec2::new(-50.0, -50.0), sim.sprites.asteroid, v));
        let next = sim.next_entity_id();
        sim.spawn(Entity::asteroid(next, Vec2::new(100.0, 100.0), sim.sprites.asteroid, v));

        let mut surface = RecordingSurface::new();
        run(&mut sim, 1, &mut surface);
        assert!(sim.entity(gone).is_none());
        assert_eq!(sim.entity(next).unwrap().pos, Vec2::new(100.0, 100.0));

        run(&mut sim, 1, &mut surface);
        assert_eq!(sim.entity(next).unwrap().pos, Vec2::new(107.5, 107.5));
    }

    #[test]
    fn test_same_seed_same_run() {
        let arena = Arena::new(800.0, 600.0);
        let mut a = Simulation::with_default_scene(arena, 77, KeyBindings::default());
        let mut b = Simulation::with_default_scene(arena, 77, KeyBindings::default());
        let mut surface = RecordingSurface::new();
        run(&mut a, 120, &mut surface);
        run(&mut b, 120, &mut surface);
        assert_eq!(a.entities, b.entities);
        assert_eq!(a.time_ticks, b.time_ticks);
    }
}
