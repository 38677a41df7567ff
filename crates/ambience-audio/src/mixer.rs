//! Audio mixer: sums every active voice through the master gain.

use crate::voice::Voice;
use ambience_core::{clamp_volume, defaults, SoundId};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Mixer shared between the control thread and the output callback.
pub type SharedMixer = Arc<Mutex<Mixer>>;

/// Audio mixer that combines active voices into interleaved output.
///
/// Final level of a voice is `master_volume × voice gain`; the two factors
/// are stored independently.
pub struct Mixer {
    /// Active voices, at most one per track.
    voices: BTreeMap<SoundId, Voice>,
    /// Master volume.
    master_volume: f32,
    /// Master limiter enabled.
    pub limiter_enabled: bool,
    /// Limiter threshold in linear amplitude.
    pub limiter_threshold: f32,
}

impl Mixer {
    /// Create an empty mixer at the default master volume.
    pub fn new() -> Self {
        Self {
            voices: BTreeMap::new(),
            master_volume: defaults::MASTER_VOLUME,
            limiter_enabled: true,
            limiter_threshold: 1.0,
        }
    }

    /// Create an empty mixer wrapped for sharing with an output stream.
    pub fn shared() -> SharedMixer {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Add a voice. Returns the voice it replaced, if that track was playing.
    pub fn insert_voice(&mut self, voice: Voice) -> Option<Voice> {
        self.voices.insert(voice.sound_id().clone(), voice)
    }

    /// Detach a voice.
    pub fn remove_voice(&mut self, id: &str) -> Option<Voice> {
        self.voices.remove(id)
    }

    /// Detach every voice.
    pub fn take_voices(&mut self) -> Vec<Voice> {
        std::mem::take(&mut self.voices).into_values().collect()
    }

    /// Active voice for a track.
    pub fn voice(&self, id: &str) -> Option<&Voice> {
        self.voices.get(id)
    }

    /// Mutable active voice for a track.
    pub fn voice_mut(&mut self, id: &str) -> Option<&mut Voice> {
        self.voices.get_mut(id)
    }

    /// Whether a track has an active voice.
    pub fn contains(&self, id: &str) -> bool {
        self.voices.contains_key(id)
    }

    /// Number of active voices.
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Ids of active voices, sorted.
    pub fn active_ids(&self) -> Vec<SoundId> {
        self.voices.keys().cloned().collect()
    }

    /// Master volume in `[0, 1]`.
    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Set the master volume; affects every voice on the next render.
    pub fn set_master_volume(&mut self, level: f32) {
        self.master_volume = clamp_volume(level);
    }

    /// Render `out.len() / channels` frames of interleaved audio.
    ///
    /// `out` is overwritten, not accumulated into.
    pub fn render(&mut self, out: &mut [f32], channels: usize, sample_rate: u32) {
        out.fill(0.0);

        for voice in self.voices.values_mut() {
            voice.render_into(out, channels, sample_rate);
        }

        // Apply master volume
        let master = self.master_volume;
        for s in out.iter_mut() {
            *s *= master;
        }

        // Apply limiter (simple hard clamp)
        if self.limiter_enabled {
            let threshold = self.limiter_threshold;
            for s in out.iter_mut() {
                *s = s.clamp(-threshold, threshold);
            }
        }
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}
