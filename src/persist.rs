//! Layout persistence over an injected key-value string store.
//!
//! DESIGN
//! ======
//! The layout is written as one JSON blob under a single key. Writes are
//! gated on the store's dirty flag so an untouched default layout never
//! overwrites a richer one saved by an earlier session.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is fatal. A missing or corrupt record loads as `None`; a
//! failed write is logged and reported as [`SaveOutcome::Failed`], and the
//! in-memory layout stays authoritative for the rest of the session. The dirty
//! flag is cleared only after a successful write.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::HashMap;

use tracing::{info, warn};

use crate::config::LayoutConfig;
use crate::store::{Layout, LayoutStore};

/// Minimal string storage, e.g. browser `localStorage`.
pub trait KeyValueStore {
    /// Raw value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`. Returns `false` if the write was rejected.
    fn set(&mut self, key: &str, value: &str) -> bool;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, like a full quota.
    #[must_use]
    pub fn rejecting() -> Self {
        Self { reject_writes: true, ..Self::default() }
    }

    /// Pre-populate `key` with a raw value.
    #[must_use]
    pub fn with_entry(mut self, key: &str, raw: &str) -> Self {
        self.entries.insert(key.to_string(), raw.to_string());
        self
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        if self.reject_writes {
            return false;
        }
        self.entries.insert(key.to_string(), value.to_string());
        true
    }
}

/// Errors produced while encoding, decoding or writing a layout record.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The stored text is not a layout record.
    #[error("layout record parse failed: {0}")]
    Parse(#[source] serde_json::Error),

    /// The layout could not be serialized.
    #[error("layout record encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// The record parsed but holds values a layout cannot contain.
    #[error("layout record invalid: {0}")]
    Invalid(String),

    /// No storage backend is reachable (e.g. storage disabled in the browser).
    #[error("storage unavailable")]
    StorageUnavailable,

    /// The backend refused the write (e.g. quota exceeded).
    #[error("storage rejected write for key {key}")]
    WriteRejected { key: String },
}

/// What a call to [`PersistenceAdapter::save`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing changed since the last save.
    Skipped,
    /// The layout was written.
    Saved,
    /// The write failed; the layout is still dirty.
    Failed,
}

/// Serialize a layout to its persisted JSON form.
pub fn encode(layout: &Layout) -> Result<String, PersistError> {
    serde_json::to_string(layout).map_err(PersistError::Encode)
}

/// Parse and validate a persisted layout record.
pub fn decode(raw: &str) -> Result<Layout, PersistError> {
    let layout: Layout = serde_json::from_str(raw).map_err(PersistError::Parse)?;
    if let Some((id, _)) = layout.positions.iter().find(|(_, p)| !p.is_finite()) {
        return Err(PersistError::Invalid(format!("non-finite position for {id}")));
    }
    if let Some((id, _)) = layout.sizes.iter().find(|(_, s)| !s.is_valid()) {
        return Err(PersistError::Invalid(format!("non-positive size for {id}")));
    }
    Ok(layout)
}

/// Reads and writes the layout record under one storage key.
pub struct PersistenceAdapter<S: KeyValueStore> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    /// Adapter using the configured storage key.
    #[must_use]
    pub fn from_config(storage: S, config: &LayoutConfig) -> Self {
        Self::new(storage, config.storage_key.clone())
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Write the store's layout if it has unsaved user changes.
    pub fn save(&mut self, store: &mut LayoutStore) -> SaveOutcome {
        if !store.is_dirty() {
            return SaveOutcome::Skipped;
        }
        match self.write(store.layout()) {
            Ok(()) => {
                store.mark_clean();
                info!(key = %self.key, widgets = store.order().len(), "layout saved");
                SaveOutcome::Saved
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "layout save failed; keeping in-memory layout");
                SaveOutcome::Failed
            }
        }
    }

    /// Unconditionally write `layout`.
    pub fn write(&mut self, layout: &Layout) -> Result<(), PersistError> {
        let raw = encode(layout)?;
        if self.storage.set(&self.key, &raw) {
            Ok(())
        } else {
            Err(PersistError::WriteRejected { key: self.key.clone() })
        }
    }

    /// The persisted layout, or `None` if there is none or it cannot be read.
    #[must_use]
    pub fn load(&self) -> Option<Layout> {
        let raw = self.storage.get(&self.key)?;
        match decode(&raw) {
            Ok(layout) => Some(layout),
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring unreadable persisted layout");
                None
            }
        }
    }

    /// Whether a readable layout is stored.
    #[must_use]
    pub fn has_saved(&self) -> bool {
        self.load().is_some()
    }
}
