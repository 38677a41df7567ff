//! Concurrent asset loading and the decoded buffer store.
//!
//! Every catalog entry is decoded on its own worker thread. Workers never
//! touch shared state: each one sends a single [`LoadEvent`] back over a
//! channel, and the control thread moves finished buffers into the
//! [`BufferStore`]. The store is therefore written from one thread only and
//! each key is written at most once.

use crate::decoder::{decode_file, DecodedBuffer};
use ambience_core::{AmbienceError, Catalog, Result, SoundId};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Availability of one track's decoded audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Not decoded yet (or never requested).
    Pending,
    /// Decoded and playable.
    Ready,
    /// Read or decode failed; unavailable for the rest of the session.
    Failed,
}

/// Decoded buffers keyed by sound id.
#[derive(Debug, Default)]
pub struct BufferStore {
    buffers: HashMap<SoundId, Arc<DecodedBuffer>>,
    failed: HashSet<SoundId>,
}

impl BufferStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a buffer. Returns `false` and keeps the existing buffer if the
    /// id already has one.
    pub fn insert(&mut self, id: SoundId, buffer: DecodedBuffer) -> bool {
        if self.buffers.contains_key(&id) {
            return false;
        }
        self.failed.remove(&id);
        self.buffers.insert(id, Arc::new(buffer));
        true
    }

    /// Record that a track could not be loaded.
    pub fn mark_failed(&mut self, id: SoundId) {
        if !self.buffers.contains_key(&id) {
            self.failed.insert(id);
        }
    }

    /// Shared handle to a decoded buffer.
    pub fn get(&self, id: &str) -> Option<Arc<DecodedBuffer>> {
        self.buffers.get(id).cloned()
    }

    /// Whether a decoded buffer exists for the id.
    pub fn contains(&self, id: &str) -> bool {
        self.buffers.contains_key(id)
    }

    /// Availability of a track.
    pub fn status(&self, id: &str) -> LoadStatus {
        if self.buffers.contains_key(id) {
            LoadStatus::Ready
        } else if self.failed.contains(id) {
            LoadStatus::Failed
        } else {
            LoadStatus::Pending
        }
    }

    /// Number of decoded buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether nothing has been decoded yet.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

/// Completion report from one worker.
#[derive(Debug)]
pub struct LoadEvent {
    /// Track the worker was loading.
    pub id: SoundId,
    /// Decoded audio, or why it could not be produced.
    pub outcome: Result<DecodedBuffer>,
}

/// Spawns decode workers and collects their results.
pub struct AssetLoader {
    sender: Sender<LoadEvent>,
    receiver: Receiver<LoadEvent>,
    outstanding: usize,
}

impl AssetLoader {
    /// Create a loader with no work queued.
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            sender,
            receiver,
            outstanding: 0,
        }
    }

    /// Start loading every catalog entry, resolving files against `asset_root`.
    pub fn spawn_catalog(catalog: &Catalog, asset_root: &Path) -> Self {
        let mut loader = Self::new();
        info!(
            count = catalog.len(),
            root = %asset_root.display(),
            "Loading sound assets"
        );
        for sound in catalog.iter() {
            loader.load(asset_root.join(&sound.source_file), sound.id.clone());
        }
        loader
    }

    /// Decode `source_file` in the background and report it under `id`.
    ///
    /// Never fails from the caller's point of view: problems surface as a
    /// failed [`LoadEvent`].
    pub fn load(&mut self, source_file: PathBuf, id: SoundId) {
        self.outstanding += 1;
        let sender = self.sender.clone();
        let worker_id = id.clone();

        let spawned = std::thread::Builder::new()
            .name(format!("load-{}", id))
            .spawn(move || {
                let outcome = decode_file(&source_file);
                // The receiver only disappears when the loader is dropped.
                let _ = sender.send(LoadEvent {
                    id: worker_id,
                    outcome,
                });
            });

        if let Err(e) = spawned {
            let _ = self.sender.send(LoadEvent {
                id,
                outcome: Err(AmbienceError::Internal(format!(
                    "Failed to spawn loader thread: {}",
                    e
                ))),
            });
        }
    }

    /// Number of loads that have not reported back.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Whether every requested load has reported back.
    pub fn is_idle(&self) -> bool {
        self.outstanding == 0
    }

    /// Move every finished load into `store` without blocking.
    ///
    /// Returns the number of events applied.
    pub fn drain_into(&mut self, store: &mut BufferStore) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.receiver.try_recv() {
            self.apply(event, store);
            applied += 1;
        }
        applied
    }

    /// Block until every outstanding load has reported or `timeout` elapses.
    ///
    /// Returns `true` when the loader is idle.
    pub fn wait_into(&mut self, store: &mut BufferStore, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.outstanding > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(event) => self.apply(event, store),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.outstanding == 0
    }

    fn apply(&mut self, event: LoadEvent, store: &mut BufferStore) {
        self.outstanding = self.outstanding.saturating_sub(1);
        match event.outcome {
            Ok(buffer) => {
                info!(
                    sound = %event.id,
                    secs = buffer.duration_secs(),
                    channels = buffer.channels(),
                    "Sound loaded"
                );
                store.insert(event.id, buffer);
            }
            Err(e) => {
                warn!(sound = %event.id, "Error loading sound: {}", e);
                store.mark_failed(event.id);
            }
        }
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}
