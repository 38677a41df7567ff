//! Ambience Core - Foundation types for the ambient sound mixer
//!
//! This crate provides the types shared by every other Ambience crate:
//! - Sound catalog (SoundId, SoundDefinition, Catalog)
//! - Presets (Preset, PresetTable)
//! - Volume clamping
//! - The common error type

pub mod catalog;
pub mod error;
pub mod preset;
pub mod volume;

pub use catalog::{Catalog, SoundDefinition, SoundId};
pub use error::{AmbienceError, Result};
pub use preset::{Preset, PresetTable};
pub use volume::clamp_volume;

/// Defaults shared by the session and the UI.
pub mod defaults {
    /// Master volume at startup (slider fully up).
    pub const MASTER_VOLUME: f32 = 1.0;

    /// Resolution of the per-track volume sliders.
    pub const VOLUME_STEP: f32 = 0.01;

    /// Countdown durations offered by the timer selector, in minutes. 0 = off.
    pub const TIMER_CHOICES_MINUTES: &[i32] = &[0, 5, 10, 15, 30, 45, 60, 90, 120];

    /// Key under which the dark-mode flag is persisted.
    pub const DARK_MODE_KEY: &str = "darkMode";
}
