//! Drawing abstraction
//!
//! The simulation draws through [`Surface`]: sprites centred on a pose and
//! horizontally centred text. The canvas surface lives in `platform::web`;
//! [`RecordingSurface`] keeps frames in memory for the native driver and tests.

pub mod recording;

pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::SpriteDesc;

/// Font used for subsequent text draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size_px: f32,
}

impl Font {
    /// Score readout
    pub const HUD: Font = Font { size_px: 30.0 };
    /// Game over banner
    pub const BANNER: Font = Font { size_px: 80.0 };

    /// CSS font shorthand
    pub fn css(&self) -> String {
        format!("{}px sans-serif", self.size_px)
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::HUD
    }
}

/// A pending UI text draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRequest {
    pub text: String,
    pub pos: Vec2,
}

/// Drawing backend
pub trait Surface {
    /// Draw `sprite` centred at `center`, rotated by `rotation_deg` (0 = up)
    fn draw_sprite(&mut self, sprite: &SpriteDesc, center: Vec2, rotation_deg: f32);

    /// Font for subsequent `draw_text` calls
    fn set_font(&mut self, font: Font);

    /// Draw `text` horizontally centred on `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2);
}
