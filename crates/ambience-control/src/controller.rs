//! Single owner of mixer state.
//!
//! Every control surface sends [`Action`]s here; nothing else mutates the
//! session, timer, or theme. The host calls [`Controller::pump_loader`] and
//! [`Controller::poll_timer`] once per frame. A running countdown also arms
//! an [`ExpiryWatchdog`], so playback stops at the deadline even when the
//! host stops polling.

use crate::action::{Action, Notice};
use crate::presets::PresetEngine;
use crate::theme::{ThemeMode, ThemePreference};
use crate::timer::{CountdownTimer, TimerEvent};
use crate::watchdog::ExpiryWatchdog;
use ambience_audio::PlaybackSession;
use ambience_media::AssetLoader;
use tracing::{debug, info};

pub struct Controller {
    session: PlaybackSession,
    presets: PresetEngine,
    timer: CountdownTimer,
    watchdog: Option<ExpiryWatchdog>,
    theme: ThemePreference,
}

impl Controller {
    pub fn new(
        session: PlaybackSession,
        presets: PresetEngine,
        timer: CountdownTimer,
        theme: ThemePreference,
    ) -> Self {
        Self {
            session,
            presets,
            timer,
            watchdog: None,
            theme,
        }
    }

    /// Apply one user intent.
    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "Dispatch");
        match action {
            Action::Play(id) => {
                self.session.play_at_slider(&id);
            }
            Action::Stop(id) => {
                self.session.stop(id.as_str());
            }
            Action::SetVolume(id, volume) => self.session.set_volume(id.as_str(), volume),
            Action::SetMasterVolume(level) => self.session.set_master_volume(level),
            Action::PlayAll => {
                self.session.play_all();
            }
            Action::StopAll => self.stop_all(),
            Action::ApplyPreset(key) => {
                self.apply_preset(&key);
            }
            Action::StartTimer(minutes) => self.start_timer(minutes),
            Action::ResetTimer => self.reset_timer(),
            Action::ToggleTheme => {
                self.toggle_theme();
            }
        }
    }

    /// Stop every voice and cancel the countdown.
    pub fn stop_all(&mut self) {
        self.reset_timer();
        self.session.stop_all();
    }

    /// Cancel the countdown and its watchdog.
    pub fn reset_timer(&mut self) {
        self.watchdog = None;
        self.timer.reset();
    }

    /// Apply a preset. Applying any known preset also cancels the countdown.
    ///
    /// Returns `false` for unknown keys, which change nothing.
    pub fn apply_preset(&mut self, key: &str) -> bool {
        if self.presets.table().get(key).is_none() {
            debug!(preset = key, "Unknown preset ignored");
            return false;
        }
        // Cancel first so an expiring watchdog cannot take the new voices.
        self.reset_timer();
        self.presets.apply(key, &mut self.session).is_some()
    }

    /// Start (or with `minutes <= 0`, cancel) the countdown.
    pub fn start_timer(&mut self, minutes: i32) {
        self.watchdog = None;
        self.timer.start(minutes);
        self.watchdog = self
            .timer
            .time_left()
            .map(|after| ExpiryWatchdog::arm(after, self.session.mixer().clone()));
    }

    /// Flip the theme and persist it.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle()
    }

    /// Count down one second by hand.
    pub fn on_timer_tick(&mut self) -> Option<Notice> {
        let event = self.timer.tick();
        self.handle_timer_event(event)
    }

    /// Apply the periods elapsed since the countdown was armed, and pick up
    /// a watchdog that already silenced the mixer.
    pub fn poll_timer(&mut self) -> Option<Notice> {
        if self.watchdog.as_ref().is_some_and(ExpiryWatchdog::has_fired) {
            self.reset_timer();
            info!("Timer ended, playback stopped");
            return Some(Notice::TimerEnded);
        }
        let event = self.timer.poll();
        self.handle_timer_event(event)
    }

    fn handle_timer_event(&mut self, event: Option<TimerEvent>) -> Option<Notice> {
        match event? {
            TimerEvent::Expired => {
                self.watchdog = None;
                let stopped = self.session.stop_all();
                info!(stopped, "Timer ended, playback stopped");
                Some(Notice::TimerEnded)
            }
        }
    }

    /// Move finished loads into the session's buffer store.
    pub fn pump_loader(&mut self, loader: &mut AssetLoader) -> usize {
        loader.drain_into(self.session.buffers_mut())
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PlaybackSession {
        &mut self.session
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn theme(&self) -> &ThemePreference {
        &self.theme
    }

    pub fn presets(&self) -> &PresetEngine {
        &self.presets
    }
}
