//! The player's ship

use glam::Vec2;

use super::context::TickContext;
use super::entity::{Entity, EntityKind};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::rotate_deg;

/// Name carried in collision events; the game ends when it shows up
pub const PLAYER_NAME: &str = "Player";

/// Offset from the ship's centre to its nose, in pixels
pub fn muzzle_offset(sprite_height: f32, rotation_deg: f32) -> Vec2 {
    rotate_deg(Vec2::new(0.0, -sprite_height / 2.0), rotation_deg)
}

pub(super) fn update(entity: &mut Entity, ctx: &mut TickContext) {
    let EntityKind::Player(mut state) = entity.kind else {
        return;
    };

    entity.move_by(ctx.arena, ctx.input.axes());
    entity.clamp_to_bounds(ctx.arena);

    if ctx.input.fire_held() && state.ticks_since_fired > FIRE_COOLDOWN_TICKS {
        let height = entity
            .sprite
            .map(|s| s.height)
            .unwrap_or(ctx.sprites.player.height);
        let offset = muzzle_offset(height, entity.rotation);

        let id = ctx.next_entity_id();
        let missile = Entity::missile(
            id,
            entity.pos + offset,
            ctx.sprites.missile,
            entity.rotation,
            offset * MISSILE_SPEED_FACTOR,
        );
        log::trace!("{:?} fired {:?} heading {:.0}", entity.id, id, entity.heading());
        ctx.spawn(missile);
        ctx.audio.play(SoundEffect::Fire);
        state.ticks_since_fired = 0;
    }

    if ctx.input.rotate_left_held() {
        entity.rotation -= ROTATION_STEP_DEG;
    } else if ctx.input.rotate_right_held() {
        entity.rotation += ROTATION_STEP_DEG;
    }

    state.ticks_since_fired = state.ticks_since_fired.saturating_add(1);
    entity.kind = EntityKind::Player(state);
}
