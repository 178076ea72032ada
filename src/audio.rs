//! Audio system
//!
//! Sound effects are fire-and-forget: the simulation asks for an effect and
//! never waits for playback. Backends decide how (or whether) it is heard.

use std::cell::RefCell;
use std::rc::Rc;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Two collidable entities met
    Impact,
    /// Player fired a missile
    Fire,
}

impl SoundEffect {
    /// Audio file path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            SoundEffect::Impact => "sfx/impact.wav",
            SoundEffect::Fire => "sfx/fire.wav",
        }
    }
}

/// Something that can start playback of an effect at a volume
pub trait AudioBackend {
    fn play(&self, effect: SoundEffect, volume: f32);
}

/// Backend that plays nothing
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&self, _effect: SoundEffect, _volume: f32) {}
}

/// Backend that only logs requested effects
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {:?} at volume {:.2}", effect, volume);
    }
}

/// Backend that records every effect it was asked to play
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    played: Rc<RefCell<Vec<SoundEffect>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects played so far, oldest first
    pub fn played(&self) -> Vec<SoundEffect> {
        self.played.borrow().clone()
    }

    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.borrow().iter().filter(|e| **e == effect).count()
    }
}

impl AudioBackend for RecordingBackend {
    fn play(&self, effect: SoundEffect, _volume: f32) {
        self.played.borrow_mut().push(effect);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager that never produces sound
    pub fn silent() -> Self {
        Self::new(Box::new(SilentBackend))
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }
}
