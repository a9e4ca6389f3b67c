// SPDX-License-Identifier: LGPL-3.0-only
use anyhow::Result;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use themer_theme::error::{ThemeError, ThemeResult};
use themer_theme::storage::KeyValueStorage;
use xdg::BaseDirectories;

use crate::io_helpers::write_file_creating_dirs;

/// File name of the storage file inside the data directory.
pub const STORAGE_FILE: &str = "storage.json";

/// Durable [KeyValueStorage] backed by a JSON object on disk.
///
/// Entries are cached in memory and the whole file is rewritten on every
/// `set_item`, the same way browser local storage behaves from the caller's
/// point of view.
#[derive(Debug)]
pub struct FileStorage {
    items: IndexMap<String, String>,
    path: PathBuf,
}

impl FileStorage {
    /// Open the storage file in the user data directory
    /// (`$XDG_DATA_HOME/themer/storage.json`).
    pub fn new() -> Result<Self> {
        let xdg_dirs = BaseDirectories::with_prefix("themer")?;
        let path = xdg_dirs.get_data_home().join(STORAGE_FILE);
        Ok(Self::with_path(path))
    }

    /// Open a storage file at an explicit location.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and treated as empty; it is replaced on the next write.
    pub fn with_path(path: PathBuf) -> Self {
        let items = match Self::read_items(&path) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("Failed to read storage file {:?}: {}", path, e);
                IndexMap::new()
            },
        };
        Self { items, path }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the backing file, dropping cached entries.
    pub fn reload(&mut self) -> Result<()> {
        self.items = Self::read_items(&self.path)?;
        Ok(())
    }

    fn read_items(path: &Path) -> Result<IndexMap<String, String>> {
        if !path.exists() {
            return Ok(IndexMap::new());
        }
        log::info!("Loading storage from: {:?}", path);
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {:?}: {}", path, e))?;
        let items = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {:?}: {}", path, e))?;
        Ok(items)
    }

    fn flush(&self) -> std::io::Result<()> {
        let content = serde_json::to_string_pretty(&self.items)?;
        write_file_creating_dirs(&self.path, &content)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> ThemeResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> ThemeResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
            .map_err(|e| ThemeError::storage_write(key, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let mut storage = FileStorage::with_path(path.clone());
        assert_eq!(storage.get_item("theme").unwrap(), None);
        assert!(storage.reload().is_err());

        storage.set_item("theme", "{}").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"theme\": \"{}\""));
    }
}
