//! Ambience Media - audio asset decoding and loading
//!
//! This crate handles:
//! - Decoding audio files into in-memory sample buffers (symphonia)
//! - Loading every catalog entry concurrently, one worker per track
//! - The write-once buffer store read by the playback session

pub mod decoder;
pub mod loader;

pub use decoder::{decode_bytes, decode_file, DecodedBuffer};
pub use loader::{AssetLoader, BufferStore, LoadEvent, LoadStatus};
