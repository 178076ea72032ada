//! Circle-vs-circle collision pass
//!
//! Every collidable entity is a circle whose radius is a fixed fraction of its
//! sprite width. The pass runs once per tick after all updates and removes
//! colliding pairs immediately, so an entity takes part in at most one
//! collision per tick.

use glam::Vec2;

use super::entity::Entity;
use super::events::CollisionEvent;
use super::state::Simulation;
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::COLLISION_RADIUS_FACTOR;
use crate::distance;

/// Collision radius for a sprite of the given width
#[inline]
pub fn collision_radius(width: f32) -> f32 {
    width * COLLISION_RADIUS_FACTOR
}

/// Strict overlap test: touching at exactly the threshold is a miss
#[inline]
pub fn circles_overlap(a: Vec2, a_width: f32, b: Vec2, b_width: f32) -> bool {
    distance(a, b) < collision_radius(a_width) + collision_radius(b_width)
}

/// Whether two entities are both collidable and overlapping
pub fn entities_collide(a: &Entity, b: &Entity) -> bool {
    if a.id == b.id {
        return false;
    }
    match (a.collidable_sprite(), b.collidable_sprite()) {
        (Some(sa), Some(sb)) => circles_overlap(a.pos, sa.width, b.pos, sb.width),
        _ => false,
    }
}

/// Run the collision pass, returning the number of collisions reported.
///
/// The outer cursor walks the live collection; removals shift later entities
/// down and the cursor keeps advancing.
pub fn detect_collisions(sim: &mut Simulation, audio: &AudioManager) -> usize {
    let mut collisions = 0;
    let mut k = 0;

    while k < sim.entities.len() {
        let a = &sim.entities[k];
        let hit = match a.collidable_sprite() {
            Some(_) => sim.entities.iter().find(|b| entities_collide(a, b)),
            None => None,
        };

        if let Some(b) = hit {
            let (a_id, b_id) = (a.id, b.id);
            let event = CollisionEvent::new(sim.time_ticks, a, b);
            log::debug!(
                "collision {:?} x {:?} at tick {}",
                event.pair[0].name,
                event.pair[1].name,
                event.tick
            );

            sim.publish_collision(event);
            audio.play(SoundEffect::Impact);
            sim.remove(b_id);
            sim.remove(a_id);
            collisions += 1;
        }
        k += 1;
    }

    collisions
}
