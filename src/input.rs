//! Keyboard state
//!
//! Raw press/release notifications are reduced to a two-axis direction and a
//! held-state map. Both are last-writer-wins between ticks.

use std::collections::HashMap;

use glam::Vec2;

use crate::settings::KeyBindings;

/// A single press or release of a physical key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// `KeyboardEvent.code` value, e.g. "KeyW" or "Space"
    pub code: String,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn down(code: &str) -> Self {
        Self {
            code: code.to_string(),
            pressed: true,
        }
    }

    pub fn up(code: &str) -> Self {
        Self {
            code: code.to_string(),
            pressed: false,
        }
    }
}

/// Input snapshot read by the simulation every tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Direction per axis, each in {-1, 0, 1}
    axes: [i8; 2],
    keys: HashMap<String, bool>,
    bindings: KeyBindings,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            axes: [0, 0],
            keys: HashMap::new(),
            bindings,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Apply one key notification
    pub fn handle_key(&mut self, event: &KeyEvent) {
        let code = event.code.as_str();
        let b = &self.bindings;
        // First matching binding wins, same as a single if/else chain
        let axis = if b.up.iter().any(|c| c == code) {
            Some((1, -1))
        } else if b.left.iter().any(|c| c == code) {
            Some((0, -1))
        } else if b.down.iter().any(|c| c == code) {
            Some((1, 1))
        } else if b.right.iter().any(|c| c == code) {
            Some((0, 1))
        } else {
            None
        };

        if let Some((index, dir)) = axis {
            self.axes[index] = if event.pressed { dir } else { 0 };
        }

        self.keys.insert(event.code.clone(), event.pressed);
    }

    /// Current direction as a vector with components in {-1, 0, 1}
    pub fn axes(&self) -> Vec2 {
        Vec2::new(self.axes[0] as f32, self.axes[1] as f32)
    }

    pub fn set_axes(&mut self, x: i8, y: i8) {
        self.axes = [x.signum(), y.signum()];
    }

    /// Whether a key code is currently held
    pub fn is_held(&self, code: &str) -> bool {
        self.keys.get(code).copied().unwrap_or(false)
    }

    pub fn set_held(&mut self, code: &str, held: bool) {
        self.keys.insert(code.to_string(), held);
    }

    pub fn fire_held(&self) -> bool {
        self.is_held(&self.bindings.fire)
    }

    pub fn rotate_left_held(&self) -> bool {
        self.is_held(&self.bindings.rotate_left)
    }

    pub fn rotate_right_held(&self) -> bool {
        self.is_held(&self.bindings.rotate_right)
    }

    /// Press or release the fire binding
    pub fn set_fire(&mut self, held: bool) {
        let code = self.bindings.fire.clone();
        self.set_held(&code, held);
    }

    /// Hold at most one rotate key: negative turns left, positive right
    pub fn set_rotation(&mut self, direction: i8) {
        let left = self.bindings.rotate_left.clone();
        let right = self.bindings.rotate_right.clone();
        self.set_held(&left, direction < 0);
        self.set_held(&right, direction > 0);
    }

    /// Release everything
    pub fn clear(&mut self) {
        self.axes = [0, 0];
        self.keys.clear();
    }
}
