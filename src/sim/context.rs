//! Per-entity update context
//!
//! An entity's tick sees the arena, the input snapshot and the RNG, and
//! reports spawns, self-destruction and HUD text back through the context.
//! The simulation applies spawns and removals right after the entity's update,
//! so they are visible to the rest of the same tick.

use rand_pcg::Pcg32;

use super::entity::{Arena, EntityId};
use super::Entity;
use crate::assets::SpriteSheet;
use crate::audio::AudioManager;
use crate::input::InputState;
use crate::renderer::TextRequest;

pub struct TickContext<'a> {
    pub arena: Arena,
    pub sprites: &'a SpriteSheet,
    pub input: &'a InputState,
    pub rng: &'a mut Pcg32,
    pub audio: &'a AudioManager,
    pub ui_text: &'a mut Vec<TextRequest>,
    next_id: &'a mut u64,
    spawned: Vec<Entity>,
    destroy_self: bool,
}

impl<'a> TickContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        arena: Arena,
        sprites: &'a SpriteSheet,
        input: &'a InputState,
        rng: &'a mut Pcg32,
        audio: &'a AudioManager,
        ui_text: &'a mut Vec<TextRequest>,
        next_id: &'a mut u64,
    ) -> Self {
        Self {
            arena,
            sprites,
            input,
            rng,
            audio,
            ui_text,
            next_id,
            spawned: Vec::new(),
            destroy_self: false,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(*self.next_id);
        *self.next_id += 1;
        id
    }

    /// Queue an entity to be appended to the collection
    pub fn spawn(&mut self, entity: Entity) {
        self.spawned.push(entity);
    }

    /// Remove the updating entity once its update returns
    pub fn destroy_self(&mut self) {
        self.destroy_self = true;
    }

    /// Spawned entities and the self-destroy flag
    pub fn finish(self) -> (Vec<Entity>, bool) {
        (self.spawned, self.destroy_self)
    }
}
