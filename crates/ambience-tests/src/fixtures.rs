//! Shared helpers: WAV files on disk and fully loaded controllers.

use ambience_audio::PlaybackSession;
use ambience_control::{Controller, CountdownTimer, MemoryStore, PresetEngine, ThemePreference};
use ambience_core::Catalog;
use ambience_media::DecodedBuffer;
use std::path::Path;
use std::sync::Arc;

/// Write a constant-level 16-bit WAV of `frames` frames.
pub fn write_wav(path: &Path, channels: u16, sample_rate: u32, frames: usize, level: i16) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..frames * channels as usize {
        writer.write_sample(level).unwrap();
    }
    writer.finalize().unwrap();
}

/// Session over the built-in catalog with a constant buffer for every track.
pub fn loaded_session() -> PlaybackSession {
    let catalog = Arc::new(Catalog::builtin());
    let mut session = PlaybackSession::detached(Arc::clone(&catalog));
    for id in catalog.ids() {
        let buffer = DecodedBuffer::new(vec![0.5; 256], 48000, 2).unwrap();
        session.buffers_mut().insert(id.clone(), buffer);
    }
    session
}

pub fn controller_with(session: PlaybackSession, timer: CountdownTimer) -> Controller {
    Controller::new(
        session,
        PresetEngine::default(),
        timer,
        ThemePreference::load(Box::new(MemoryStore::new())),
    )
}
