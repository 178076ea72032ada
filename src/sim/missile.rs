//! Missiles fired by the player

use glam::Vec2;

use super::context::TickContext;
use super::entity::Entity;

/// Name carried in collision events; hits involving it score a point
pub const MISSILE_NAME: &str = "Missile";

pub(super) fn update(entity: &mut Entity, velocity: Vec2, ctx: &mut TickContext) {
    entity.move_by(ctx.arena, velocity);
    entity.destroy_if_out_of_bounds(ctx);
}
