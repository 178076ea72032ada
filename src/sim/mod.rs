//! Tick-driven simulation module
//!
//! All gameplay logic lives here:
//! - Fixed cadence only, no delta time
//! - Seeded RNG only
//! - Collection order is update order, draw order and collision scan order
//! - No platform dependencies; drawing and sound go through traits

pub mod asteroid;
pub mod autopilot;
pub mod collision;
pub mod context;
pub mod entity;
pub mod events;
pub mod missile;
pub mod player;
pub mod score;
pub mod state;
pub mod tick;

pub use autopilot::PilotCommand;
pub use collision::{circles_overlap, collision_radius, detect_collisions};
pub use context::TickContext;
pub use entity::{Arena, Entity, EntityId, EntityKind, PlayerState};
pub use events::{CollisionEvent, EventBus, Listener, Participant};
pub use state::{GamePhase, Simulation, Snapshot};
pub use tick::{GAME_OVER_TEXT, TickOutcome, tick};
