//! Property tests for the playback session.

use ambience_audio::PlaybackSession;
use ambience_core::{Catalog, SoundId};
use ambience_media::DecodedBuffer;
use proptest::prelude::*;
use std::sync::Arc;

const IDS: &[&str] = &[
    "rain", "waves", "thunder", "forest", "whiteNoise", "fireplace", "coffeeShop", "train",
];

fn loaded_session(loaded: &[bool]) -> PlaybackSession {
    let mut session = PlaybackSession::detached(Arc::new(Catalog::builtin()));
    for (id, &is_loaded) in IDS.iter().zip(loaded) {
        if is_loaded {
            let buffer = DecodedBuffer::new(vec![0.25; 16], 44100, 2).unwrap();
            session.buffers_mut().insert(SoundId::new(*id), buffer);
        }
    }
    session
}

#[derive(Debug, Clone)]
enum Op {
    Play(usize, f32),
    Stop(usize),
    SetVolume(usize, f32),
    Master(f32),
    PlayAll,
    StopAll,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..IDS.len(), 0.0f32..=1.0).prop_map(|(i, v)| Op::Play(i, v)),
        (0..IDS.len()).prop_map(Op::Stop),
        (0..IDS.len(), 0.0f32..=1.0).prop_map(|(i, v)| Op::SetVolume(i, v)),
        (0.0f32..=1.0).prop_map(Op::Master),
        Just(Op::PlayAll),
        Just(Op::StopAll),
    ]
}

proptest! {
    #[test]
    fn active_voices_always_have_buffers(
        loaded in proptest::collection::vec(any::<bool>(), IDS.len()),
        ops in proptest::collection::vec(op(), 0..40),
    ) {
        let mut session = loaded_session(&loaded);
        for op in ops {
            match op {
                Op::Play(i, v) => { session.play(&SoundId::new(IDS[i]), v); }
                Op::Stop(i) => { session.stop(IDS[i]); }
                Op::SetVolume(i, v) => session.set_volume(IDS[i], v),
                Op::Master(v) => session.set_master_volume(v),
                Op::PlayAll => { session.play_all(); }
                Op::StopAll => { session.stop_all(); }
            }
            for id in session.active_ids() {
                prop_assert!(session.buffers().contains(id.as_str()));
            }
        }
    }

    #[test]
    fn play_then_stop_leaves_nothing(index in 0..IDS.len(), volume in 0.0f32..=1.0) {
        let mut session = loaded_session(&[true; 8]);
        let id = SoundId::new(IDS[index]);
        session.play(&id, volume);
        session.stop(id.as_str());
        prop_assert!(!session.is_playing(id.as_str()));
    }

    #[test]
    fn repeated_play_never_stacks(
        index in 0..IDS.len(),
        volumes in proptest::collection::vec(0.0f32..=1.0, 1..6),
    ) {
        let mut session = loaded_session(&[true; 8]);
        let id = SoundId::new(IDS[index]);
        for v in &volumes {
            session.play(&id, *v);
        }
        prop_assert_eq!(session.active_ids(), vec![id.clone()]);
        prop_assert_eq!(session.voice_gain(id.as_str()), volumes.last().copied());
    }

    #[test]
    fn master_never_changes_track_gain(gain in 0.0f32..=1.0, master in 0.0f32..=1.0) {
        let mut session = loaded_session(&[true; 8]);
        session.play(&SoundId::new("rain"), gain);
        session.set_master_volume(master);
        prop_assert_eq!(session.voice_gain("rain"), Some(gain));
        let level = session.effective_level("rain").unwrap();
        prop_assert!((level - gain * master).abs() < 1e-6);
    }
}
