//! Sound catalog: the fixed list of loopable tracks.

use crate::error::{AmbienceError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Unique key of a catalog entry (e.g. `"rain"`, `"whiteNoise"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundId(String);

impl SoundId {
    /// Create a sound id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SoundId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SoundId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// Lets maps keyed by `SoundId` be queried with a plain `&str`.
impl Borrow<str> for SoundId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SoundId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One loopable track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundDefinition {
    /// Unique key.
    pub id: SoundId,
    /// Display name.
    pub name: String,
    /// Symbolic icon name, mapped to a glyph by the UI.
    pub icon: String,
    /// Audio file, relative to the asset root.
    pub source_file: PathBuf,
    /// Volume in `[0, 1]` used until the user moves the slider.
    pub default_volume: f32,
}

impl SoundDefinition {
    /// Create a definition with the standard default volume of 0.5.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        source_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: SoundId::new(id),
            name: name.into(),
            icon: icon.into(),
            source_file: source_file.into(),
            default_volume: 0.5,
        }
    }

    /// Override the default volume.
    pub fn with_default_volume(mut self, volume: f32) -> Self {
        self.default_volume = volume;
        self
    }
}

/// Ordered, immutable set of sound definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    sounds: Vec<SoundDefinition>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and out-of-range volumes.
    pub fn new(sounds: Vec<SoundDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for sound in &sounds {
            if !seen.insert(sound.id.clone()) {
                return Err(AmbienceError::InvalidParameter(format!(
                    "Duplicate sound id: {}",
                    sound.id
                )));
            }
            if !(0.0..=1.0).contains(&sound.default_volume) {
                return Err(AmbienceError::InvalidParameter(format!(
                    "Default volume {} of '{}' is outside 0..=1",
                    sound.default_volume, sound.id
                )));
            }
        }
        Ok(Self { sounds })
    }

    /// The eight tracks shipped with the mixer.
    pub fn builtin() -> Self {
        Self {
            sounds: vec![
                SoundDefinition::new("rain", "Rain", "cloud-rain", "sounds/rain.mp3"),
                SoundDefinition::new("waves", "Ocean Waves", "water", "sounds/waves.mp3"),
                SoundDefinition::new("thunder", "Thunder", "bolt", "sounds/thunder.mp3"),
                SoundDefinition::new("forest", "Forest", "tree", "sounds/forest.mp3"),
                SoundDefinition::new("whiteNoise", "White Noise", "wind", "sounds/white-noise.mp3"),
                SoundDefinition::new("fireplace", "Fireplace", "fire", "sounds/fireplace.mp3"),
                SoundDefinition::new("coffeeShop", "Coffee Shop", "coffee", "sounds/coffee-shop.mp3"),
                SoundDefinition::new("train", "Distant Train", "train", "sounds/train.mp3"),
            ],
        }
    }

    /// Look up a definition by id.
    pub fn get(&self, id: &str) -> Option<&SoundDefinition> {
        self.sounds.iter().find(|s| s.id.as_str() == id)
    }

    /// Check whether an id belongs to the catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All definitions in display order.
    pub fn iter(&self) -> impl Iterator<Item = &SoundDefinition> {
        self.sounds.iter()
    }

    /// All ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = &SoundId> {
        self.sounds.iter().map(|s| &s.id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
