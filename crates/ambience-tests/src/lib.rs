//! Integration test crate for Ambience.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple ambience crates to verify they work together.

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod loading;

#[cfg(test)]
mod playback;

#[cfg(test)]
mod settings;
