//! Game settings and preferences
//!
//! Persisted separately from high scores under the `settings` key.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;
use crate::sim::Road;

/// Master volume change per key press
pub const VOLUME_STEP: f32 = 0.1;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all cues
    pub muted: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (road backdrop stops scrolling)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "settings";

    /// Volume actually applied to cues (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Nudge master volume, kept on the 0.1 grid within 0.0 - 1.0
    pub fn step_volume(&mut self, delta: f32) {
        let stepped = ((self.master_volume + delta) * 10.0).round() / 10.0;
        self.master_volume = stepped.clamp(0.0, 1.0);
    }

    /// Road tile positions to draw, frozen under reduced motion
    pub fn road_tiles(&self, road: &Road) -> [f32; 2] {
        if self.reduced_motion {
            Road::default().tile_offsets()
        } else {
            road.tile_offsets()
        }
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.load(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Settings are malformed, using defaults: {e}");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings, using defaults: {e:#}");
                Self::default()
            }
        }
    }

    /// Save settings. Failures are logged, not fatal.
    pub fn save(&self, storage: &mut dyn Storage) {
        let result = serde_json::to_string(self)
            .map_err(anyhow::Error::from)
            .and_then(|json| storage.store(Self::STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {e:#}"),
        }
    }
}
