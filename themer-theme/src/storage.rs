//! # Palette Persistence
//!
//! The active palette is mirrored into a durable key-value store under a
//! single key, encoded as JSON. The store itself is abstracted behind
//! [KeyValueStorage] so hosts can plug in whatever backs their settings;
//! `themer-services` ships a file-backed implementation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::error::{ThemeError, ThemeResult};
use crate::importer::is_truthy;
use crate::palette::Palette;

/// The storage key used unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "theme";

/// A durable string-to-string store.
pub trait KeyValueStorage {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> ThemeResult<Option<String>>;

    /// Store `value` under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> ThemeResult<()>;
}

/// In-memory [KeyValueStorage].
///
/// Clones share their entries, which makes it easy to simulate a second
/// session reading what the first one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one entry.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.items.borrow_mut().insert(key.into(), value.into());
        storage
    }

    /// Read an entry without going through the trait.
    pub fn item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> ThemeResult<Option<String>> {
        Ok(self.item(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> ThemeResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the active palette under one storage key.
pub struct PaletteStorage {
    backend: Box<dyn KeyValueStorage>,
    key: String,
}

impl PaletteStorage {
    /// Wrap a backend, using `key` for the palette entry.
    pub fn new(backend: Box<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Persist `palette` as JSON. Backend failures are returned.
    pub fn write(&mut self, palette: &Palette) -> ThemeResult<()> {
        let json = palette.to_json()?;
        self.backend.set_item(&self.key, &json)
    }

    /// Read the persisted palette.
    ///
    /// Returns `None` when the entry is absent, is not JSON, or has no
    /// background. Each case is logged; none is an error.
    pub fn read(&self) -> Option<Palette> {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("No stored theme under '{}'", self.key);
                return None;
            },
            Err(e) => {
                log::warn!("{}", e);
                return None;
            },
        };

        match decode_stored(&raw) {
            Ok(palette) => Some(palette),
            Err(e) => {
                log::warn!("Ignoring stored theme under '{}': {}", self.key, e);
                None
            },
        }
    }
}

fn decode_stored(raw: &str) -> ThemeResult<Palette> {
    let value: Value = serde_json::from_str(raw)?;
    let has_background = value.get("background").is_some_and(is_truthy);
    if !has_background {
        return Err(ThemeError::not_a_theme("stored value has no background"));
    }
    Ok(serde_json::from_value(value)?)
}
