//! Entities and their shared behaviors
//!
//! Every object in the arena is an [`Entity`]: a pose, an optional sprite, an
//! optional name used to identify it in collision events, and an
//! [`EntityKind`] carrying the per-variant state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::context::TickContext;
use super::{asteroid, missile, player, score};
use crate::assets::SpriteDesc;
use crate::consts::*;

/// Stable identity of an entity within one simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Rectangular play area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Pixels covered by one movement unit
    #[inline]
    pub fn move_scale(&self) -> f32 {
        self.height / MOVE_UNITS_PER_HEIGHT
    }

    /// Clamp a point into [0, width] x [0, height]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }

    /// Whether a point lies strictly outside the arena grown by `margin`
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }
}

/// Player-only state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Ticks since the last shot (saturates, starts "long ago")
    pub ticks_since_fired: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            ticks_since_fired: u32::MAX,
        }
    }
}

/// Closed set of entity variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Sprite only, no behavior (background)
    Plain,
    Player(PlayerState),
    /// Moves by a constant velocity in movement units per tick
    Asteroid { velocity: Vec2 },
    /// Moves by a constant velocity in movement units per tick
    Missile { velocity: Vec2 },
    /// Headless; spawns asteroids on the arena edges
    AsteroidSpawner,
    /// Headless; accumulates score from collision events
    ScoreTracker { score: u32 },
}

/// Anything taking part in the tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Vec2,
    /// Degrees, 0 = up, positive turns clockwise on screen
    pub rotation: f32,
    pub sprite: Option<SpriteDesc>,
    pub name: Option<String>,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: EntityId, pos: Vec2, sprite: Option<SpriteDesc>, kind: EntityKind) -> Self {
        Self {
            id,
            pos,
            rotation: 0.0,
            sprite,
            name: None,
            kind,
        }
    }

    /// Static decoration such as the background
    pub fn plain(id: EntityId, pos: Vec2, sprite: SpriteDesc) -> Self {
        Self::new(id, pos, Some(sprite), EntityKind::Plain)
    }

    pub fn player(id: EntityId, pos: Vec2, sprite: SpriteDesc) -> Self {
        Self::new(id, pos, Some(sprite), EntityKind::Player(PlayerState::default()))
            .with_name(player::PLAYER_NAME)
    }

    pub fn asteroid(id: EntityId, pos: Vec2, sprite: SpriteDesc, velocity: Vec2) -> Self {
        Self::new(id, pos, Some(sprite), EntityKind::Asteroid { velocity })
            .with_name(asteroid::ASTEROID_NAME)
    }

    pub fn missile(
        id: EntityId,
        pos: Vec2,
        sprite: SpriteDesc,
        rotation: f32,
        velocity: Vec2,
    ) -> Self {
        let mut missile = Self::new(id, pos, Some(sprite), EntityKind::Missile { velocity })
            .with_name(missile::MISSILE_NAME);
        missile.rotation = rotation;
        missile
    }

    pub fn asteroid_spawner(id: EntityId) -> Self {
        Self::new(id, Vec2::ZERO, None, EntityKind::AsteroidSpawner)
    }

    pub fn score_tracker(id: EntityId) -> Self {
        Self::new(id, Vec2::ZERO, None, EntityKind::ScoreTracker { score: 0 })
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Rotation folded into [0, 360)
    pub fn heading(&self) -> f32 {
        crate::normalize_degrees(self.rotation)
    }

    /// Sprite, if the collision detector should consider this entity
    pub fn collidable_sprite(&self) -> Option<&SpriteDesc> {
        self.sprite.as_ref().filter(|s| s.collidable)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    pub fn is_asteroid(&self) -> bool {
        matches!(self.kind, EntityKind::Asteroid { .. })
    }

    pub fn is_missile(&self) -> bool {
        matches!(self.kind, EntityKind::Missile { .. })
    }

    /// Current score if this is a score tracker
    pub fn score(&self) -> Option<u32> {
        match self.kind {
            EntityKind::ScoreTracker { score } => Some(score),
            _ => None,
        }
    }

    /// Displace by `delta` movement units (scaled by arena height)
    pub fn move_by(&mut self, arena: Arena, delta: Vec2) {
        self.pos += delta * arena.move_scale();
    }

    /// Keep the entity inside the arena
    pub fn clamp_to_bounds(&mut self, arena: Arena) {
        self.pos = arena.clamp(self.pos);
    }

    pub fn is_out_of_bounds(&self, arena: Arena) -> bool {
        arena.is_outside(self.pos, OUT_OF_BOUNDS_MARGIN)
    }

    /// Ask for removal once the entity drifts past the arena margin
    pub fn destroy_if_out_of_bounds(&self, ctx: &mut TickContext) {
        if self.is_out_of_bounds(ctx.arena) {
            ctx.destroy_self();
        }
    }

    /// Run this entity's per-tick behavior
    pub fn update(&mut self, ctx: &mut TickContext) {
        match self.kind {
            EntityKind::Plain => {}
            EntityKind::Player(_) => player::update(self, ctx),
            EntityKind::Asteroid { velocity } => asteroid::update(self, velocity, ctx),
            EntityKind::Missile { velocity } => missile::update(self, velocity, ctx),
            EntityKind::AsteroidSpawner => asteroid::update_spawner(ctx),
            EntityKind::ScoreTracker { score } => score::update(score, ctx),
        }
    }
}
