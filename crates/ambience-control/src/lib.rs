//! Ambience Control - everything between user intent and the audio engine
//!
//! Provides:
//! - Typed actions and their dispatch onto a single `Controller`
//! - The preset engine (exclusive track/volume combinations)
//! - The countdown timer that stops playback on expiry, backed by a
//!   watchdog thread that silences the mixer at the deadline
//! - The persisted light/dark theme preference

pub mod action;
pub mod controller;
pub mod presets;
pub mod theme;
pub mod timer;
pub mod watchdog;

pub use action::{Action, Notice};
pub use controller::Controller;
pub use presets::PresetEngine;
pub use theme::{JsonFileStore, KeyValueStore, MemoryStore, ThemeMode, ThemePreference};
pub use timer::{CountdownTimer, TimerEvent, TimerState};
pub use watchdog::ExpiryWatchdog;
