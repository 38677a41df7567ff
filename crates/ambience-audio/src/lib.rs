//! Ambience Audio - Audio engine
//!
//! Handles looping playback, mixing, and output.
//!
//! Architecture:
//! - `Voice`: one playing instance of a track; built on play, consumed on stop
//! - `Mixer`: per-voice gain summed through a shared master gain
//! - `AudioOutput`: cpal stream that pulls rendered audio from the mixer
//! - `PlaybackSession`: play/stop/volume operations over the buffer store

pub mod mixer;
pub mod output;
pub mod session;
pub mod voice;

pub use mixer::{Mixer, SharedMixer};
pub use output::AudioOutput;
pub use session::PlaybackSession;
pub use voice::Voice;
