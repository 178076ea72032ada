//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; read from a JSON file named by
//! `ASTEROID_DODGE_SETTINGS` on native. Missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physical key codes (`KeyboardEvent.code` values) for each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub fire: String,
    pub rotate_left: String,
    pub rotate_right: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let codes = |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
        Self {
            up: codes(&["KeyW", "ArrowUp"]),
            down: codes(&["KeyS", "ArrowDown"]),
            left: codes(&["KeyA", "ArrowLeft"]),
            right: codes(&["KeyD", "ArrowRight"]),
            fire: "Space".to_string(),
            rotate_left: "KeyQ".to_string(),
            rotate_right: "KeyE".to_string(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tick timer period in milliseconds
    pub tick_interval_ms: u64,
    /// Arena size used by the native driver (the web uses the canvas size)
    pub arena_width: f32,
    pub arena_height: f32,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// Stop the native driver after this many ticks
    pub max_ticks: Option<u64>,
    /// Let the built-in pilot fly the ship
    pub autopilot: bool,

    pub keys: KeyBindings,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            seed: None,
            max_ticks: None,
            autopilot: false,

            keys: KeyBindings::default(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "asteroid_dodge_settings";

    /// Environment variable naming the native settings file
    pub const PATH_ENV: &'static str = "ASTEROID_DODGE_SETTINGS";

    /// Parse settings, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Tick period clamped to at least 1 ms
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.max(1)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `ASTEROID_DODGE_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path);
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "keys": { "fire": "KeyF" } }"#);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.keys.fire, "KeyF");
        assert_eq!(settings.keys.rotate_left, "KeyQ");
        assert_eq!(settings.tick_interval_ms, TICK_INTERVAL_MS);
    }

    #[test]
    fn test_malformed_document_falls_back() {
        let settings = Settings::from_json("{ not json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut settings = Settings::default();
        settings.autopilot = true;
        settings.max_ticks = Some(600);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }

    #[test]
    fn test_tick_interval_never_zero() {
        let settings = Settings {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(settings.tick_interval_ms(), 1);
    }
}
