//! Sprite sheet descriptors
//!
//! The simulation only needs sizes and the collidable flag; image decoding is
//! left to whichever surface resolves `path` into a drawable.

use serde::{Deserialize, Serialize};

/// Every sprite the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Asteroid,
    Missile,
    Background,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 4] = [
        SpriteKind::Player,
        SpriteKind::Asteroid,
        SpriteKind::Missile,
        SpriteKind::Background,
    ];

    /// Image path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            SpriteKind::Player => "img/player.png",
            SpriteKind::Asteroid => "img/asteroid.png",
            SpriteKind::Missile => "img/missile.png",
            SpriteKind::Background => "img/background.png",
        }
    }
}

/// Visual descriptor attached to an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteDesc {
    pub kind: SpriteKind,
    pub width: f32,
    pub height: f32,
    /// Whether the collision detector considers this entity
    pub collidable: bool,
}

/// Sprite descriptors for one arena size
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub player: SpriteDesc,
    pub asteroid: SpriteDesc,
    pub missile: SpriteDesc,
    pub background: SpriteDesc,
}

impl SpriteSheet {
    /// Standard sheet; the background stretches over the whole arena
    pub fn new(arena_width: f32, arena_height: f32) -> Self {
        Self {
            player: SpriteDesc {
                kind: SpriteKind::Player,
                width: 64.0,
                height: 64.0,
                collidable: true,
            },
            asteroid: SpriteDesc {
                kind: SpriteKind::Asteroid,
                width: 32.0,
                height: 32.0,
                collidable: true,
            },
            missile: SpriteDesc {
                kind: SpriteKind::Missile,
                width: 32.0,
                height: 32.0,
                collidable: true,
            },
            background: SpriteDesc {
                kind: SpriteKind::Background,
                width: arena_width,
                height: arena_height,
                collidable: false,
            },
        }
    }
}
