//! Background expiry for the sleep timer.
//!
//! The countdown itself is polled from the UI thread, which may stop drawing
//! frames while the window is hidden. The watchdog waits for the deadline on
//! its own thread and silences the mixer directly, so playback stops on time
//! whether or not anything polls.

use ambience_audio::SharedMixer;
use crossbeam_channel::{select, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Armed deadline that takes every voice out of the mixer when it passes.
///
/// Dropping the watchdog cancels it.
pub struct ExpiryWatchdog {
    /// Never sent on; dropping it wakes the worker.
    _cancel: Sender<()>,
    cancelled: Arc<AtomicBool>,
    fired: Arc<AtomicBool>,
}

impl ExpiryWatchdog {
    /// Silence `mixer` once `after` has elapsed, unless dropped first.
    pub fn arm(after: Duration, mixer: SharedMixer) -> Self {
        let (cancel, cancel_rx) = crossbeam_channel::bounded::<()>(0);
        let cancelled = Arc::new(AtomicBool::new(false));
        let fired = Arc::new(AtomicBool::new(false));

        let worker_cancelled = Arc::clone(&cancelled);
        let worker_fired = Arc::clone(&fired);
        let deadline = crossbeam_channel::after(after);

        let spawned = std::thread::Builder::new()
            .name("sleep-timer".into())
            .spawn(move || {
                select! {
                    recv(deadline) -> _ => {
                        let voices = {
                            let mut mixer = mixer.lock();
                            // Checked under the lock: a cancel that got the lock
                            // first may already have started new voices.
                            if worker_cancelled.load(Ordering::SeqCst) {
                                return;
                            }
                            worker_fired.store(true, Ordering::SeqCst);
                            mixer.take_voices()
                        };
                        let stopped = voices.len();
                        for voice in voices {
                            voice.stop();
                        }
                        info!(stopped, "Sleep timer deadline reached, playback stopped");
                    }
                    recv(cancel_rx) -> _ => {}
                }
            });

        if let Err(e) = spawned {
            warn!("Failed to spawn sleep timer thread: {}", e);
        }

        Self {
            _cancel: cancel,
            cancelled,
            fired,
        }
    }

    /// Whether the deadline passed and the mixer was silenced.
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Drop for ExpiryWatchdog {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambience_audio::{Mixer, Voice};
    use ambience_core::SoundId;
    use ambience_media::DecodedBuffer;
    use std::time::Instant;

    fn mixer_with_voice() -> SharedMixer {
        let mixer = Mixer::shared();
        let buffer = Arc::new(DecodedBuffer::new(vec![0.5; 8], 48000, 2).unwrap());
        mixer
            .lock()
            .insert_voice(Voice::start(SoundId::new("rain"), buffer, 0.5));
        mixer
    }

    #[test]
    fn test_fires_without_polling() {
        let mixer = mixer_with_voice();
        let watchdog = ExpiryWatchdog::arm(Duration::from_millis(20), Arc::clone(&mixer));

        let deadline = Instant::now() + Duration::from_secs(5);
        while !watchdog.has_fired() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(watchdog.has_fired());
        assert_eq!(mixer.lock().voice_count(), 0);
    }

    #[test]
    fn test_drop_cancels() {
        let mixer = mixer_with_voice();
        let watchdog = ExpiryWatchdog::arm(Duration::from_millis(20), Arc::clone(&mixer));
        drop(watchdog);

        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(mixer.lock().voice_count(), 1);
    }
}
