//! Named track/volume combinations.

use crate::catalog::SoundId;
use serde::{Deserialize, Serialize};

/// A named combination of tracks and volumes, applied exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Lookup key (e.g. `"deepSleep"`).
    pub key: String,
    /// Display name (e.g. "Deep Sleep").
    pub name: String,
    /// Tracks to start, in insertion order, with their volumes.
    pub sounds: Vec<(SoundId, f32)>,
}

impl Preset {
    /// Create an empty preset.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            sounds: Vec::new(),
        }
    }

    /// Append a track. A repeated id replaces the earlier volume in place.
    pub fn with_sound(mut self, id: impl Into<SoundId>, volume: f32) -> Self {
        let id = id.into();
        match self.sounds.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = volume,
            None => self.sounds.push((id, volume)),
        }
        self
    }

    /// Volume for a track, if the preset lists it.
    pub fn volume_of(&self, id: &str) -> Option<f32> {
        self.sounds
            .iter()
            .find(|(sound, _)| sound.as_str() == id)
            .map(|(_, v)| *v)
    }
}

/// Immutable preset table, fixed at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetTable {
    presets: Vec<Preset>,
}

impl PresetTable {
    /// Build a table from presets.
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// Presets shipped with the mixer.
    pub fn builtin() -> Self {
        Self::new(vec![
            Preset::new("deepSleep", "Deep Sleep")
                .with_sound("thunder", 0.4)
                .with_sound("whiteNoise", 0.3)
                .with_sound("forest", 0.2),
            Preset::new("focusFlow", "Focus Flow")
                .with_sound("coffeeShop", 0.5)
                .with_sound("rain", 0.3),
            Preset::new("meditation", "Meditation")
                .with_sound("forest", 0.4)
                .with_sound("waves", 0.4)
                .with_sound("whiteNoise", 0.2),
        ])
    }

    /// Look up a preset by key.
    pub fn get(&self, key: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.key == key)
    }

    /// All presets in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::builtin()
    }
}
