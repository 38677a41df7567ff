//! Integration tests for the controller driving the session and timer.

use crate::fixtures::{controller_with, loaded_session};
use ambience_control::{Action, CountdownTimer, Notice};
use ambience_core::SoundId;
use std::time::{Duration, Instant};

fn id(s: &str) -> SoundId {
    SoundId::new(s)
}

#[test]
fn deep_sleep_replaces_whatever_was_playing() {
    let mut controller = controller_with(loaded_session(), CountdownTimer::new());
    controller.dispatch(Action::PlayAll);
    controller.dispatch(Action::SetMasterVolume(0.7));

    controller.dispatch(Action::ApplyPreset("deepSleep".into()));

    let session = controller.session();
    assert_eq!(
        session.active_ids(),
        vec![id("forest"), id("thunder"), id("whiteNoise")]
    );
    assert_eq!(session.voice_gain("thunder"), Some(0.4));
    assert_eq!(session.voice_gain("whiteNoise"), Some(0.3));
    assert_eq!(session.voice_gain("forest"), Some(0.2));
    // Master volume is not part of a preset.
    assert!((session.master_volume() - 0.7).abs() < 1e-6);
}

#[test]
fn preset_volumes_seed_play_all() {
    let mut controller = controller_with(loaded_session(), CountdownTimer::new());
    controller.dispatch(Action::ApplyPreset("focusFlow".into()));
    controller.dispatch(Action::StopAll);
    controller.dispatch(Action::PlayAll);

    let session = controller.session();
    assert_eq!(session.active_ids().len(), 8);
    assert_eq!(session.voice_gain("coffeeShop"), Some(0.5));
    assert_eq!(session.voice_gain("rain"), Some(0.3));
    assert_eq!(session.voice_gain("train"), Some(0.5));
}

#[test]
fn master_volume_scales_render_only() {
    let mut controller = controller_with(loaded_session(), CountdownTimer::new());
    controller.dispatch(Action::SetVolume(id("rain"), 0.6));
    controller.dispatch(Action::Play(id("rain")));

    let mut full = vec![0.0f32; 64];
    controller.session().mixer().lock().render(&mut full, 2, 48000);

    controller.dispatch(Action::SetMasterVolume(0.25));
    let mut quiet = vec![0.0f32; 64];
    controller.session().mixer().lock().render(&mut quiet, 2, 48000);

    assert_eq!(controller.session().voice_gain("rain"), Some(0.6));
    for (a, b) in full.iter().zip(quiet.iter()) {
        assert!((a * 0.25 - b).abs() < 1e-6);
    }
}

#[test]
fn elapsed_periods_expire_timer_and_stop_playback() {
    // Each period counts as one second; a 1 ms period makes a minute pass fast.
    let timer = CountdownTimer::with_period(Duration::from_millis(1));
    let mut controller = controller_with(loaded_session(), timer);
    controller.dispatch(Action::ApplyPreset("meditation".into()));
    controller.dispatch(Action::StartTimer(1));

    let deadline = Instant::now() + Duration::from_secs(10);
    let mut notices = Vec::new();
    while Instant::now() < deadline && notices.is_empty() {
        notices.extend(controller.poll_timer());
        std::thread::sleep(Duration::from_millis(5));
    }

    assert_eq!(notices, vec![Notice::TimerEnded]);
    assert!(!controller.session().is_any_playing());
    assert!(!controller.timer().is_running());

    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(controller.poll_timer(), None);
}

#[test]
fn restarted_timer_ignores_old_countdown() {
    let mut controller = controller_with(loaded_session(), CountdownTimer::new());
    controller.dispatch(Action::Play(id("rain")));
    controller.dispatch(Action::StartTimer(1));
    for _ in 0..59 {
        assert_eq!(controller.on_timer_tick(), None);
    }

    controller.dispatch(Action::StartTimer(5));
    assert_eq!(controller.on_timer_tick(), None);
    assert!(controller.session().is_playing("rain"));
    assert_eq!(controller.timer().remaining_seconds(), 5 * 60 - 1);
}

#[test]
fn stop_all_mid_countdown_means_no_notice() {
    let mut controller = controller_with(loaded_session(), CountdownTimer::new());
    controller.dispatch(Action::PlayAll);
    controller.dispatch(Action::StartTimer(1));
    controller.dispatch(Action::StopAll);

    for _ in 0..120 {
        assert_eq!(controller.on_timer_tick(), None);
    }
}

#[test]
fn unpolled_timer_still_silences_mixer() {
    let timer = CountdownTimer::with_period(Duration::from_millis(1));
    let mut controller = controller_with(loaded_session(), timer);
    controller.dispatch(Action::PlayAll);
    controller.dispatch(Action::StartTimer(1));

    // Nobody polls; the deadline alone has to stop playback.
    let deadline = Instant::now() + Duration::from_secs(5);
    while controller.session().is_any_playing() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(!controller.session().is_any_playing());

    assert_eq!(controller.poll_timer(), Some(Notice::TimerEnded));
    assert!(!controller.timer().is_running());
    assert_eq!(controller.poll_timer(), None);
}

#[test]
fn cancelled_timer_leaves_new_playback_alone() {
    let timer = CountdownTimer::with_period(Duration::from_millis(1));
    let mut controller = controller_with(loaded_session(), timer);
    controller.dispatch(Action::StartTimer(1));
    controller.dispatch(Action::ResetTimer);
    controller.dispatch(Action::StartTimer(1));
    controller.dispatch(Action::ApplyPreset("focusFlow".into()));
    controller.dispatch(Action::Play(id("rain")));

    std::thread::sleep(Duration::from_millis(200));
    assert_eq!(controller.poll_timer(), None);
    assert!(controller.session().is_playing("rain"));
    assert!(controller.session().is_playing("coffeeShop"));
}
