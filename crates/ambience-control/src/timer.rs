//! Countdown timer that stops playback when it runs out.
//!
//! The timer is a plain state machine driven by [`CountdownTimer::tick`].
//! While running it also remembers when it was armed; the host calls
//! [`CountdownTimer::poll`] and every whole period elapsed since arming is
//! applied as one tick. Clearing the arm instant is how a countdown is
//! cancelled, so a restarted timer never sees the old one's ticks.

use std::time::{Duration, Instant};
use tracing::info;

/// Snapshot of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerState {
    /// Length of the current countdown in seconds (0 when idle).
    pub duration_seconds: u32,
    /// Seconds left (0 when idle).
    pub remaining_seconds: u32,
    /// Whether a countdown is in progress.
    pub running: bool,
}

/// Something the host has to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown reached zero.
    Expired,
}

/// Single countdown timer with one-second granularity.
pub struct CountdownTimer {
    state: TimerState,
    armed_at: Option<Instant>,
    /// Ticks already applied by `poll` since arming.
    polled_ticks: u64,
    period: Duration,
}

impl CountdownTimer {
    /// Create an idle timer ticking once per second.
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    /// Create an idle timer that advances once per `period`.
    ///
    /// Each tick still counts as one second of the countdown.
    pub fn with_period(period: Duration) -> Self {
        Self {
            state: TimerState::default(),
            armed_at: None,
            polled_ticks: 0,
            period,
        }
    }

    /// Start a countdown of `minutes`, replacing any running one.
    ///
    /// Zero or negative minutes cancel the timer instead.
    pub fn start(&mut self, minutes: i32) {
        if minutes <= 0 {
            self.reset();
            return;
        }

        let seconds = (minutes as u32).saturating_mul(60);
        self.state = TimerState {
            duration_seconds: seconds,
            remaining_seconds: seconds,
            running: true,
        };
        self.armed_at = Some(Instant::now());
        self.polled_ticks = 0;
        info!(minutes, "Timer started");
    }

    /// Cancel the countdown and return to idle.
    pub fn reset(&mut self) {
        if self.state.running {
            info!("Timer reset");
        }
        self.armed_at = None;
        self.polled_ticks = 0;
        self.state = TimerState::default();
    }

    /// Count down one second.
    ///
    /// Returns [`TimerEvent::Expired`] on the tick that reaches zero; the
    /// timer is idle afterwards. Ticks while idle do nothing.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.state.running {
            return None;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds == 0 {
            self.reset();
            info!("Timer expired");
            return Some(TimerEvent::Expired);
        }
        None
    }

    /// Apply every period that has elapsed since the last poll.
    ///
    /// Never blocks. Returns `Expired` at most once.
    pub fn poll(&mut self) -> Option<TimerEvent> {
        let armed_at = self.armed_at?;
        let period = self.period.as_nanos().max(1);
        let due = (armed_at.elapsed().as_nanos() / period) as u64;

        while self.polled_ticks < due {
            self.polled_ticks += 1;
            if let Some(event) = self.tick() {
                return Some(event);
            }
        }
        None
    }

    /// Current state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Whether a countdown is in progress.
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Seconds left.
    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    /// Wall-clock time until the countdown expires, or `None` when idle.
    pub fn time_left(&self) -> Option<Duration> {
        let armed_at = self.armed_at.filter(|_| self.state.running)?;
        let total = self.period.saturating_mul(self.state.duration_seconds);
        Some(total.saturating_sub(armed_at.elapsed()))
    }

    /// Remaining time as `m:ss`.
    pub fn format_remaining(&self) -> String {
        format_time(self.state.remaining_seconds)
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format seconds as `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
