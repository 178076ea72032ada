//! Asteroid Dodge - A fixed-tick arena shooter
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (entities, collisions, events, game state)
//! - `renderer`: Drawing surface abstraction and a recording surface
//! - `audio`: Sound effect manager with pluggable backends
//! - `input`: Keyboard state reduced to axes and held keys
//! - `assets`: Sprite sheet descriptors
//! - `platform`: Browser/native tick drivers
//! - `settings`: Data-driven configuration

pub mod assets;
pub mod audio;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{KeyBindings, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default tick period in milliseconds (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 16;

    /// Default arena dimensions for the native driver
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;

    /// Movement is scaled by arena height / this divisor
    pub const MOVE_UNITS_PER_HEIGHT: f32 = 80.0;
    /// Entities survive this far outside the arena before being removed
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 10.0;

    /// Ticks that must elapse between two shots (fires when the timer exceeds this)
    pub const FIRE_COOLDOWN_TICKS: u32 = 15;
    /// Degrees turned per tick while a rotate key is held
    pub const ROTATION_STEP_DEG: f32 = 2.0;
    /// Missile velocity is the muzzle offset scaled by this
    pub const MISSILE_SPEED_FACTOR: f32 = 0.1;

    /// Chance per tick that the spawner emits an asteroid
    pub const ASTEROID_SPAWN_CHANCE: f64 = 0.15;
    /// Asteroid velocity step is arena height / this divisor
    pub const ASTEROID_SPEED_DIVISOR: f32 = 160.0;
    pub const ASTEROID_SPEED_FACTOR: f32 = 0.1;

    /// Collision radius as a fraction of sprite width
    pub const COLLISION_RADIUS_FACTOR: f32 = 0.3;

    /// Vertical position of the score readout
    pub const SCORE_TEXT_Y: f32 = 40.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Rotate a vector by `degrees` (screen space, clockwise for positive angles)
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}
