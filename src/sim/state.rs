//! Simulation state
//!
//! The [`Simulation`] is the context object every system receives: it owns
//! the entity collection, the input snapshot, the HUD text queue, the
//! collision bus and the game-over state.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Arena, Entity, EntityId, EntityKind};
use super::events::{CollisionEvent, EventBus, Listener};
use crate::assets::SpriteSheet;
use crate::input::InputState;
use crate::renderer::TextRequest;
use crate::settings::KeyBindings;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance entities
    Running,
    /// Terminal: nothing updates or draws again
    Over,
}

/// Debug dump of the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: u64,
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub score: Option<u32>,
    pub entities: Vec<Entity>,
}

pub struct Simulation {
    pub arena: Arena,
    pub sprites: SpriteSheet,
    /// Live entities; insertion order is update and draw order
    pub entities: Vec<Entity>,
    pub input: InputState,
    /// HUD text queued during the tick, drained when drawn
    pub ui_text: Vec<TextRequest>,
    pub bus: EventBus,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) next_id: u64,
    is_over: bool,
}

impl Simulation {
    /// Empty arena with default key bindings
    pub fn new(arena: Arena, seed: u64) -> Self {
        Self::with_bindings(arena, seed, KeyBindings::default())
    }

    pub fn with_bindings(arena: Arena, seed: u64, bindings: KeyBindings) -> Self {
        Self {
            arena,
            sprites: SpriteSheet::new(arena.width, arena.height),
            entities: Vec::new(),
            input: InputState::new(bindings),
            ui_text: Vec::new(),
            bus: EventBus::new(),
            phase: GamePhase::Running,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            is_over: false,
        }
    }

    /// Standard opening: background, ship at the centre, spawner, score
    pub fn with_default_scene(arena: Arena, seed: u64, bindings: KeyBindings) -> Self {
        let mut sim = Self::with_bindings(arena, seed, bindings);
        let center = arena.center();
        let sprites = sim.sprites;

        let id = sim.next_entity_id();
        sim.spawn(Entity::plain(id, center, sprites.background));
        let id = sim.next_entity_id();
        sim.spawn(Entity::player(id, center, sprites.player));
        let id = sim.next_entity_id();
        sim.spawn(Entity::asteroid_spawner(id));
        let id = sim.next_entity_id();
        sim.spawn(Entity::score_tracker(id));

        log::info!(
            "Scene ready: {}x{} arena, seed {}",
            arena.width,
            arena.height,
            seed
        );
        sim
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an entity, registering its collision listener
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        if let Some(listener) = Listener::for_entity(&entity) {
            self.bus.subscribe(entity.id, listener);
        }
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    /// Remove an entity; absent IDs are ignored
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.entities.iter().position(|e| e.id == id) {
            Some(index) => {
                self.entities.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.is_player())
    }

    /// Score of the first live score tracker
    pub fn score(&self) -> Option<u32> {
        self.entities.iter().find_map(|e| e.score())
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Set once the player has been hit; the next tick ends the run
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Deliver a collision to every subscriber, in registration order
    pub fn publish_collision(&mut self, event: CollisionEvent) {
        let Simulation {
            bus,
            entities,
            is_over,
            ..
        } = self;

        bus.publish(event, |sub, event| match &sub.listener {
            Listener::EndGame { name } => {
                if event.involves_name(name) && !*is_over {
                    log::info!("{} was hit at tick {}", name, event.tick);
                    *is_over = true;
                }
            }
            Listener::Score { name } => {
                if !event.involves_name(name) {
                    return;
                }
                // A tracker that no longer exists has nothing to update
                let tracker = entities.iter_mut().find(|e| e.id == sub.subscriber);
                if let Some(Entity {
                    kind: EntityKind::ScoreTracker { score },
                    ..
                }) = tracker
                {
                    *score += 1;
                    log::debug!("score {}", score);
                }
            }
        });
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            time_ticks: self.time_ticks,
            phase: self.phase,
            score: self.score(),
            entities: self.entities.clone(),
        }
    }
}
