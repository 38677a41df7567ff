//! A single looping track instance.

use ambience_core::{clamp_volume, SoundId};
use ambience_media::DecodedBuffer;
use std::sync::Arc;
use tracing::debug;

/// One playing instance of a track.
///
/// A voice is started by construction and ends by being consumed with
/// [`Voice::stop`]; it cannot be paused or restarted. Playing the same track
/// again means building a new voice.
#[derive(Debug)]
pub struct Voice {
    sound_id: SoundId,
    buffer: Arc<DecodedBuffer>,
    /// Read position in source frames. Fractional when rates differ.
    cursor: f64,
    gain: f32,
}

impl Voice {
    /// Start a voice at the beginning of `buffer`.
    pub fn start(sound_id: SoundId, buffer: Arc<DecodedBuffer>, gain: f32) -> Self {
        let gain = clamp_volume(gain);
        debug!(sound = %sound_id, gain, "Voice started");
        Self {
            sound_id,
            buffer,
            cursor: 0.0,
            gain,
        }
    }

    /// Track this voice plays.
    pub fn sound_id(&self) -> &SoundId {
        &self.sound_id
    }

    /// Current track gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Change the track gain in place.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = clamp_volume(gain);
    }

    /// Current loop position in source frames.
    pub fn position_frames(&self) -> usize {
        self.cursor as usize
    }

    /// Add this voice's output, scaled by its gain, into interleaved `out`.
    ///
    /// The buffer loops forever. Mono sources feed every output channel;
    /// otherwise output channel `n` reads source channel `n % source_channels`.
    /// The source is stepped at `source_rate / output_rate` without
    /// interpolation.
    pub fn render_into(&mut self, out: &mut [f32], channels: usize, output_rate: u32) {
        let src_frames = self.buffer.frames();
        if channels == 0 || src_frames == 0 || output_rate == 0 {
            return;
        }

        let src_channels = self.buffer.channels() as usize;
        let step = self.buffer.sample_rate() as f64 / output_rate as f64;
        let len = src_frames as f64;

        for frame in out.chunks_exact_mut(channels) {
            let src_frame = (self.cursor as usize).min(src_frames - 1);
            for (ch, sample) in frame.iter_mut().enumerate() {
                *sample += self.buffer.sample(src_frame, ch % src_channels) * self.gain;
            }
            self.cursor = (self.cursor + step) % len;
        }
    }

    /// End playback, releasing the voice. Returns the track id.
    pub fn stop(self) -> SoundId {
        debug!(sound = %self.sound_id, "Voice stopped");
        self.sound_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(frames: usize, channels: u16, rate: u32) -> Arc<DecodedBuffer> {
        let samples = (0..frames * channels as usize)
            .map(|i| (i / channels as usize) as f32 / frames as f32)
            .collect();
        Arc::new(DecodedBuffer::new(samples, rate, channels).unwrap())
    }

    #[test]
    fn test_loops_past_end() {
        let buffer = ramp(4, 1, 48000);
        let mut voice = Voice::start(SoundId::new("rain"), buffer, 1.0);

        let mut out = vec![0.0f32; 10];
        voice.render_into(&mut out, 1, 48000);
        assert_eq!(&out[..4], &[0.0, 0.25, 0.5, 0.75]);
        assert_eq!(&out[4..8], &[0.0, 0.25, 0.5, 0.75]);
        assert_eq!(voice.position_frames(), 2);
    }

    #[test]
    fn test_mono_fills_both_channels() {
        let buffer = Arc::new(DecodedBuffer::new(vec![0.5; 8], 48000, 1).unwrap());
        let mut voice = Voice::start(SoundId::new("rain"), buffer, 1.0);

        let mut out = vec![0.0f32; 8];
        voice.render_into(&mut out, 2, 48000);
        assert!(out.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn test_gain_scales_output() {
        let buffer = Arc::new(DecodedBuffer::new(vec![0.8; 4], 48000, 2).unwrap());
        let mut voice = Voice::start(SoundId::new("rain"), buffer, 0.5);

        let mut out = vec![0.0f32; 4];
        voice.render_into(&mut out, 2, 48000);
        assert!(out.iter().all(|&s| (s - 0.4).abs() < 1e-6));
    }

    #[test]
    fn test_render_accumulates() {
        let buffer = Arc::new(DecodedBuffer::new(vec![0.25; 4], 48000, 1).unwrap());
        let mut voice = Voice::start(SoundId::new("rain"), buffer, 1.0);

        let mut out = vec![0.5f32; 4];
        voice.render_into(&mut out, 1, 48000);
        assert!(out.iter().all(|&s| s == 0.75));
    }

    #[test]
    fn test_rate_conversion_steps_source() {
        // 24 kHz source on a 48 kHz device: each source frame is held twice.
        let buffer = ramp(4, 1, 24000);
        let mut voice = Voice::start(SoundId::new("rain"), buffer, 1.0);

        let mut out = vec![0.0f32; 4];
        voice.render_into(&mut out, 1, 48000);
        assert_eq!(out, vec![0.0, 0.0, 0.25, 0.25]);
    }

    #[test]
    fn test_gain_is_clamped() {
        let buffer = ramp(4, 1, 48000);
        let mut voice = Voice::start(SoundId::new("rain"), buffer, 3.0);
        assert_eq!(voice.gain(), 1.0);
        voice.set_gain(-1.0);
        assert_eq!(voice.gain(), 0.0);
    }

    #[test]
    fn test_stop_returns_id() {
        let voice = Voice::start(SoundId::new("forest"), ramp(4, 1, 48000), 0.5);
        assert_eq!(voice.stop().as_str(), "forest");
    }
}
