//! Score readout
//!
//! The tracker never sees the entities it scores for: points arrive through
//! its collision subscription (see `Simulation::publish_collision`).

use glam::Vec2;

use super::context::TickContext;
use crate::consts::SCORE_TEXT_Y;
use crate::renderer::TextRequest;

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

pub(super) fn update(score: u32, ctx: &mut TickContext) {
    ctx.ui_text.push(TextRequest {
        text: score_text(score),
        pos: Vec2::new(ctx.arena.width / 2.0, SCORE_TEXT_Y),
    });
}
