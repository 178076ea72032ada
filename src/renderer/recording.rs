//! In-memory surface

use glam::Vec2;

use super::{Font, Surface};
use crate::assets::{SpriteDesc, SpriteKind};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        kind: SpriteKind,
        center: Vec2,
        rotation_deg: f32,
        width: f32,
        height: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        font: Font,
    },
}

/// Surface that records every draw call
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    font: Font,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the surface empty
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Recorded text strings in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Recorded sprite kinds in draw order
    pub fn sprites(&self) -> Vec<SpriteKind> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn draw_sprite(&mut self, sprite: &SpriteDesc, center: Vec2, rotation_deg: f32) {
        self.commands.push(DrawCommand::Sprite {
            kind: sprite.kind,
            center,
            rotation_deg,
            width: sprite.width,
            height: sprite.height,
        });
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            font: self.font,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteSheet;

    #[test]
    fn test_text_uses_current_font() {
        let mut surface = RecordingSurface::new();
        surface.draw_text("a", Vec2::ZERO);
        surface.set_font(Font::BANNER);
        surface.draw_text("b", Vec2::ZERO);

        let fonts: Vec<Font> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { font, .. } => Some(*font),
                _ => None,
            })
            .collect();
        assert_eq!(fonts, vec![Font::HUD, Font::BANNER]);
    }

    #[test]
    fn test_take_empties_surface() {
        let sheet = SpriteSheet::new(100.0, 100.0);
        let mut surface = RecordingSurface::new();
        surface.draw_sprite(&sheet.player, Vec2::new(5.0, 5.0), 90.0);
        assert_eq!(surface.sprites(), vec![SpriteKind::Player]);
        assert_eq!(surface.take().len(), 1);
        assert!(surface.commands().is_empty());
    }
}
