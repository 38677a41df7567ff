//! Preset engine: exclusive, named track/volume combinations.

use ambience_audio::PlaybackSession;
use ambience_core::{Preset, PresetTable};
use tracing::info;

/// Applies presets from a fixed table.
pub struct PresetEngine {
    table: PresetTable,
}

impl PresetEngine {
    /// Create an engine over `table`.
    pub fn new(table: PresetTable) -> Self {
        Self { table }
    }

    /// Preset table.
    pub fn table(&self) -> &PresetTable {
        &self.table
    }

    /// Apply a preset to `session`.
    ///
    /// Unknown keys return `None` and leave the session untouched. Otherwise
    /// every voice is stopped, then each listed track gets its slider set and
    /// is played in insertion order. Listed tracks that are not in the
    /// catalog, or not loaded yet, stay silent.
    pub fn apply<'a>(&'a self, key: &str, session: &mut PlaybackSession) -> Option<&'a Preset> {
        let preset = self.table.get(key)?;

        session.stop_all();

        let mut started = 0;
        for (sound_id, volume) in &preset.sounds {
            if !session.catalog().contains(sound_id.as_str()) {
                continue;
            }
            session.set_volume(sound_id.as_str(), *volume);
            if session.play(sound_id, *volume) {
                started += 1;
            }
        }

        info!(preset = %preset.key, started, "Preset applied");
        Some(preset)
    }
}

impl Default for PresetEngine {
    fn default() -> Self {
        Self::new(PresetTable::builtin())
    }
}
