//! Asteroids and the spawner that feeds them in from the arena edges

use glam::Vec2;
use rand::Rng;

use super::context::TickContext;
use super::entity::{Arena, Entity};
use crate::consts::*;

pub const ASTEROID_NAME: &str = "Asteroid";

/// One velocity component: a step in {-2..=2} scaled by arena height.
/// Rounding a uniform [0, 4) makes the outer steps half as likely.
fn velocity_component<R: Rng + ?Sized>(rng: &mut R, arena_height: f32) -> f32 {
    let step = (rng.random::<f32>() * 4.0).round() - 2.0;
    step * arena_height / ASTEROID_SPEED_DIVISOR * ASTEROID_SPEED_FACTOR
}

/// Draw a velocity, resampling the pair until neither component is zero
pub fn sample_velocity<R: Rng + ?Sized>(rng: &mut R, arena_height: f32) -> Vec2 {
    loop {
        let v = Vec2::new(
            velocity_component(rng, arena_height),
            velocity_component(rng, arena_height),
        );
        if v.x != 0.0 && v.y != 0.0 {
            return v;
        }
    }
}

/// Uniform point on one of the four arena edges
pub fn edge_spawn_position<R: Rng + ?Sized>(rng: &mut R, arena: Arena) -> Vec2 {
    if rng.random_bool(0.5) {
        let x = if rng.random_bool(0.5) { 0.0 } else { arena.width };
        Vec2::new(x, rng.random::<f32>() * arena.height)
    } else {
        let y = if rng.random_bool(0.5) { 0.0 } else { arena.height };
        Vec2::new(rng.random::<f32>() * arena.width, y)
    }
}

pub(super) fn update(entity: &mut Entity, velocity: Vec2, ctx: &mut TickContext) {
    entity.move_by(ctx.arena, velocity);
    entity.destroy_if_out_of_bounds(ctx);
}

pub(super) fn update_spawner(ctx: &mut TickContext) {
    if !ctx.rng.random_bool(ASTEROID_SPAWN_CHANCE) {
        return;
    }

    let pos = edge_spawn_position(ctx.rng, ctx.arena);
    let velocity = sample_velocity(ctx.rng, ctx.arena.height);
    let id = ctx.next_entity_id();
    log::trace!("spawning {:?} at {:?} moving {:?}", id, pos, velocity);
    ctx.spawn(Entity::asteroid(id, pos, ctx.sprites.asteroid, velocity));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::assets::SpriteSheet;
    use crate::audio::AudioManager;
    use crate::input::InputState;
    use crate::settings::KeyBindings;
    use crate::sim::entity::EntityId;

    #[test]
    fn test_velocity_never_has_zero_component() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..10_000 {
            let v = sample_velocity(&mut rng, 600.0);
            assert!(v.x != 0.0 && v.y != 0.0, "stationary axis in {:?}", v);
        }
    }

    #[test]
    fn test_velocity_steps_are_discrete() {
        let mut rng = Pcg32::seed_from_u64(11);
        let unit = 600.0 / ASTEROID_SPEED_DIVISOR * ASTEROID_SPEED_FACTOR;
        for _ in 0..1_000 {
            let v = sample_velocity(&mut rng, 600.0);
            for c in [v.x, v.y] {
                let step = c / unit;
                assert!((step - step.round()).abs() < 1e-4);
                assert!(step.round().abs() >= 1.0 && step.round().abs() <= 2.0);
            }
        }
    }

    #[test]
    fn test_spawn_positions_sit_on_an_edge() {
        let arena = Arena::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..1_000 {
            let p = edge_spawn_position(&mut rng, arena);
            let on_vertical = (p.x == 0.0 || p.x == arena.width) && (0.0..=arena.height).contains(&p.y);
            let on_horizontal = (p.y == 0.0 || p.y == arena.height) && (0.0..=arena.width).contains(&p.x);
            assert!(on_vertical || on_horizontal, "{:?} is not on an edge", p);
        }
    }

    #[test]
    fn test_all_four_edges_are_used() {
        let arena = Arena::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            let p = edge_spawn_position(&mut rng, arena);
            if p.x == 0.0 {
                seen[0] = true;
            } else if p.x == arena.width {
                seen[1] = true;
            } else if p.y == 0.0 {
                seen[2] = true;
            } else if p.y == arena.height {
                seen[3] = true;
            }
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_spawner_rate_and_edge_placement() {
        let arena = Arena::new(800.0, 600.0);
        let sprites = SpriteSheet::new(arena.width, arena.height);
        let input = InputState::new(KeyBindings::default());
        let audio = AudioManager::silent();
        let mut rng = Pcg32::seed_from_u64(15);
        let mut ui_text = Vec::new();
        let mut next_id = 2;
        let mut spawner = Entity::asteroid_spawner(EntityId(1));

        let ticks = 10_000;
        let mut spawned = Vec::new();
        for _ in 0..ticks {
            let mut ctx = TickContext::new(
                arena,
                &sprites,
                &input,
                &mut rng,
                &audio,
                &mut ui_text,
                &mut next_id,
            );
            spawner.update(&mut ctx);
            let (new_entities, destroy_self) = ctx.finish();
            assert!(!destroy_self);
            assert!(new_entities.len() <= 1);
            spawned.extend(new_entities);
        }

        // 0.15 * 10k = 1500, standard deviation about 36
        assert!(
            (1_320..=1_680).contains(&spawned.len()),
            "{} asteroids in {} ticks",
            spawned.len(),
            ticks
        );
        for rock in &spawned {
            assert!(rock.is_asteroid());
            let p = rock.pos;
            let on_edge = p.x == 0.0 || p.x == arena.width || p.y == 0.0 || p.y == arena.height;
            assert!(on_edge, "{:?} is not on an edge", p);
            assert!(arena.clamp(p) == p);
        }
    }
}
