//! Integration tests for asset loading into a playback session.

use crate::fixtures::{controller_with, write_wav};
use ambience_audio::PlaybackSession;
use ambience_control::{Action, CountdownTimer};
use ambience_core::{Catalog, SoundDefinition, SoundId};
use ambience_media::{AssetLoader, LoadStatus};
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(10);

fn test_catalog() -> Catalog {
    Catalog::new(vec![
        SoundDefinition::new("rain", "Rain", "cloud-rain", "sounds/rain.wav"),
        SoundDefinition::new("waves", "Ocean Waves", "water", "sounds/waves.wav"),
        SoundDefinition::new("train", "Distant Train", "train", "sounds/missing.wav"),
    ])
    .unwrap()
}

#[test]
fn loader_reports_once_per_entry() {
    let dir = tempfile::tempdir().unwrap();
    write_wav(&dir.path().join("sounds/rain.wav"), 1, 44100, 4410, 8192);
    write_wav(&dir.path().join("sounds/waves.wav"), 2, 48000, 2400, -4096);

    let catalog = Arc::new(test_catalog());
    let mut session = PlaybackSession::detached(Arc::clone(&catalog));
    let mut loader = AssetLoader::spawn_catalog(&catalog, dir.path());
    assert_eq!(loader.outstanding(), 3);

    assert!(loader.wait_into(session.buffers_mut(), WAIT));
    assert!(loader.is_idle());

    let buffers = session.buffers();
    assert_eq!(buffers.status("rain"), LoadStatus::Ready);
    assert_eq!(buffers.status("waves"), LoadStatus::Ready);
    assert_eq!(buffers.status("train"), LoadStatus::Failed);
    assert!(!buffers.contains("train"));

    let rain = buffers.get("rain").unwrap();
    assert_eq!(rain.channels(), 1);
    assert_eq!(rain.frames(), 4410);
    assert_eq!(rain.sample_rate(), 44100);

    let waves = buffers.get("waves").unwrap();
    assert_eq!(waves.channels(), 2);
    assert_eq!(waves.frames(), 2400);
}

#[test]
fn loading_never_starts_playback() {
    let dir = tempfile::tempdir().unwrap();
    write_wav(&dir.path().join("sounds/rain.wav"), 1, 44100, 441, 8192);

    let catalog = Arc::new(test_catalog());
    let mut controller = controller_with(
        PlaybackSession::detached(Arc::clone(&catalog)),
        CountdownTimer::new(),
    );
    let mut loader = AssetLoader::spawn_catalog(&catalog, dir.path());
    assert!(loader.wait_into(controller.session_mut().buffers_mut(), WAIT));

    assert!(!controller.session().is_any_playing());
    assert_eq!(controller.pump_loader(&mut loader), 0);
}

#[test]
fn failed_track_stays_silent() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Arc::new(test_catalog());
    let mut controller = controller_with(
        PlaybackSession::detached(Arc::clone(&catalog)),
        CountdownTimer::new(),
    );
    let mut loader = AssetLoader::spawn_catalog(&catalog, dir.path());
    assert!(loader.wait_into(controller.session_mut().buffers_mut(), WAIT));

    controller.dispatch(Action::Play(SoundId::new("train")));
    controller.dispatch(Action::PlayAll);
    assert!(!controller.session().is_any_playing());
}

#[test]
fn decoded_mono_track_renders_on_both_channels() {
    let dir = tempfile::tempdir().unwrap();
    write_wav(&dir.path().join("sounds/rain.wav"), 1, 48000, 480, 8192);

    let catalog = Arc::new(test_catalog());
    let mut session = PlaybackSession::detached(Arc::clone(&catalog));
    let mut loader = AssetLoader::spawn_catalog(&catalog, dir.path());
    assert!(loader.wait_into(session.buffers_mut(), WAIT));

    assert!(session.play(&SoundId::new("rain"), 0.8));
    session.set_master_volume(0.5);

    let mut out = vec![0.0f32; 256];
    session.mixer().lock().render(&mut out, 2, 48000);

    // 8192 / 32768 = 0.25, times 0.8 track gain, times 0.5 master.
    for frame in out.chunks(2) {
        assert!((frame[0] - 0.1).abs() < 1e-4, "left was {}", frame[0]);
        assert!((frame[1] - 0.1).abs() < 1e-4, "right was {}", frame[1]);
    }
}
