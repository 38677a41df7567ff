//! Playback session: the play/stop/volume state machine.
//!
//! The session is the single owner of playback state on the control thread.
//! It decides which voices exist; the [`Mixer`] only renders them.

use crate::mixer::{Mixer, SharedMixer};
use crate::voice::Voice;
use ambience_core::{clamp_volume, Catalog, SoundId};
use ambience_media::BufferStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Active voices, master volume, and per-track slider volumes.
///
/// Invariant: every active voice belongs to a catalog entry whose decoded
/// buffer is in the store.
pub struct PlaybackSession {
    catalog: Arc<Catalog>,
    buffers: BufferStore,
    mixer: SharedMixer,
    /// Last volume chosen for each track, seeded from the catalog defaults.
    slider_volumes: HashMap<SoundId, f32>,
}

impl PlaybackSession {
    /// Create a session that renders through `mixer`.
    pub fn new(catalog: Arc<Catalog>, mixer: SharedMixer) -> Self {
        let slider_volumes = catalog
            .iter()
            .map(|s| (s.id.clone(), clamp_volume(s.default_volume)))
            .collect();
        Self {
            catalog,
            buffers: BufferStore::new(),
            mixer,
            slider_volumes,
        }
    }

    /// Create a session with a private mixer (no output device attached).
    pub fn detached(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, Mixer::shared())
    }

    /// The fixed track list.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Decoded buffers.
    pub fn buffers(&self) -> &BufferStore {
        &self.buffers
    }

    /// Decoded buffers, for the loader to fill.
    pub fn buffers_mut(&mut self) -> &mut BufferStore {
        &mut self.buffers
    }

    /// Mixer this session renders through.
    pub fn mixer(&self) -> &SharedMixer {
        &self.mixer
    }

    /// Start `sound_id` at `volume`, replacing any voice already playing it.
    ///
    /// Returns `false` without side effects when the track is unknown or has
    /// no decoded buffer.
    pub fn play(&mut self, sound_id: &SoundId, volume: f32) -> bool {
        if !self.catalog.contains(sound_id.as_str()) {
            return false;
        }

        let Some(buffer) = self.buffers.get(sound_id.as_str()) else {
            debug!(sound = %sound_id, "Play ignored: no decoded buffer");
            return false;
        };

        let volume = clamp_volume(volume);
        let voice = Voice::start(sound_id.clone(), buffer, volume);
        let previous = self.mixer.lock().insert_voice(voice);
        // Outside the lock so the audio callback is not held up.
        if let Some(previous) = previous {
            previous.stop();
        }
        self.slider_volumes.insert(sound_id.clone(), volume);
        true
    }

    /// Start `sound_id` at its slider volume.
    pub fn play_at_slider(&mut self, sound_id: &SoundId) -> bool {
        match self.slider_volume(sound_id.as_str()) {
            Some(volume) => self.play(sound_id, volume),
            None => false,
        }
    }

    /// Stop `sound_id`. Returns `false` if it was not playing.
    pub fn stop(&mut self, sound_id: &str) -> bool {
        let removed = self.mixer.lock().remove_voice(sound_id);
        match removed {
            Some(voice) => {
                voice.stop();
                true
            }
            None => false,
        }
    }

    /// Record a track's slider volume and apply it to its voice if playing.
    ///
    /// Never starts a voice. The recorded value is what the next
    /// [`Self::play_at_slider`] or [`Self::play_all`] uses.
    pub fn set_volume(&mut self, sound_id: &str, volume: f32) {
        let volume = clamp_volume(volume);
        let Some(slot) = self.slider_volumes.get_mut(sound_id) else {
            return;
        };
        *slot = volume;

        if let Some(voice) = self.mixer.lock().voice_mut(sound_id) {
            voice.set_gain(volume);
        }
    }

    /// Set the master volume; applies to all voices at once.
    pub fn set_master_volume(&mut self, level: f32) {
        self.mixer.lock().set_master_volume(level);
    }

    /// Start every track that is not already playing, at its slider volume.
    ///
    /// Returns the number of voices started.
    pub fn play_all(&mut self) -> usize {
        let idle: Vec<SoundId> = {
            let mixer = self.mixer.lock();
            self.catalog
                .ids()
                .filter(|id| !mixer.contains(id.as_str()))
                .cloned()
                .collect()
        };

        let started = idle.iter().filter(|id| self.play_at_slider(id)).count();
        info!(started, "Play all");
        started
    }

    /// Stop every voice. Returns how many were playing.
    pub fn stop_all(&mut self) -> usize {
        let voices = self.mixer.lock().take_voices();
        let stopped = voices.len();
        for voice in voices {
            voice.stop();
        }
        if stopped > 0 {
            info!(stopped, "Stopped all sounds");
        }
        stopped
    }

    /// Whether a track has an active voice.
    pub fn is_playing(&self, sound_id: &str) -> bool {
        self.mixer.lock().contains(sound_id)
    }

    /// Whether anything is playing.
    pub fn is_any_playing(&self) -> bool {
        self.mixer.lock().voice_count() > 0
    }

    /// Ids of active voices, sorted.
    pub fn active_ids(&self) -> Vec<SoundId> {
        self.mixer.lock().active_ids()
    }

    /// Gain of the active voice for a track.
    pub fn voice_gain(&self, sound_id: &str) -> Option<f32> {
        self.mixer.lock().voice(sound_id).map(Voice::gain)
    }

    /// Master volume.
    pub fn master_volume(&self) -> f32 {
        self.mixer.lock().master_volume()
    }

    /// Last volume chosen for a track.
    pub fn slider_volume(&self, sound_id: &str) -> Option<f32> {
        self.slider_volumes.get(sound_id).copied()
    }

    /// Audible level of a track: master × voice gain, or `None` if stopped.
    pub fn effective_level(&self, sound_id: &str) -> Option<f32> {
        let mixer = self.mixer.lock();
        mixer
            .voice(sound_id)
            .map(|voice| voice.gain() * mixer.master_volume())
    }
}
