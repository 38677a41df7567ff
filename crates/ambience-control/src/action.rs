//! User intents and user-facing notices.

use ambience_core::SoundId;

/// Everything a control surface can ask the mixer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Start a track at its slider volume.
    Play(SoundId),
    /// Stop a track.
    Stop(SoundId),
    /// Move a track's volume slider.
    SetVolume(SoundId, f32),
    /// Move the master volume slider.
    SetMasterVolume(f32),
    /// Start every idle track.
    PlayAll,
    /// Stop everything and cancel the countdown.
    StopAll,
    /// Apply a preset by key.
    ApplyPreset(String),
    /// Start the countdown; zero or less cancels it.
    StartTimer(i32),
    /// Cancel the countdown.
    ResetTimer,
    /// Flip between light and dark.
    ToggleTheme,
}

/// Informational events the UI should show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The countdown reached zero and playback was stopped.
    TimerEnded,
}

impl Notice {
    /// Text shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::TimerEnded => "Timer has ended. Your sounds have been stopped.",
        }
    }
}
