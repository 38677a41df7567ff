//! Persisted light/dark preference.
//!
//! The flag lives in a flat string key-value store under
//! [`defaults::DARK_MODE_KEY`]. It is read once at startup and written and
//! flushed on every toggle.

use ambience_core::{defaults, AmbienceError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Minimal persistent string store.
pub trait KeyValueStore {
    /// Read a value.
    fn get_string(&self, key: &str) -> Option<String>;
    /// Write a value (may be buffered until [`KeyValueStore::flush`]).
    fn set_string(&mut self, key: &str, value: String);
    /// Persist buffered writes.
    fn flush(&mut self) -> Result<()>;
}

/// In-memory store, lost on exit.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`. A missing file starts empty; an unreadable or corrupt
    /// file is logged and also starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(e) => {
                warn!(path = %path.display(), "Ignoring unreadable settings: {}", e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    fn read(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file found, using defaults");
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AmbienceError::Serialization(format!("Invalid settings file: {}", e)))
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.values)
            .map_err(|e| AmbienceError::Serialization(format!("Failed to serialize settings: {}", e)))?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

/// Display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Whether this is dark mode.
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

/// Theme flag bound to its store.
pub struct ThemePreference {
    mode: ThemeMode,
    store: Box<dyn KeyValueStore>,
}

impl ThemePreference {
    /// Read the saved mode. Anything other than `"true"` means light.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let mode = match store.get_string(defaults::DARK_MODE_KEY).as_deref() {
            Some("true") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        };
        info!(?mode, "Theme preference loaded");
        Self { mode, store }
    }

    /// Current mode.
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flip the mode and persist it. A failed write is logged; the new mode
    /// still applies for this session.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.store
            .set_string(defaults::DARK_MODE_KEY, self.mode.is_dark().to_string());
        if let Err(e) = self.store.flush() {
            warn!("Failed to save theme preference: {}", e);
        }
        self.mode
    }

    /// Backing store.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}
