//! In-Memory Store Implementation
//!
//! Reference [`NativeStore`] substrate backed by a map behind a lock.
//! Faithful to the capability limits of the contract: whole-file text
//! only, writes to nonexistent entries fail, folders are not readable,
//! and the access bitmask is best-effort (overridable per path for
//! tests).

use std::collections::HashMap;
use std::sync::RwLock;

use store_traits::{NativeStore, Result, StoreError, ACCESS_ABSENT};
use tracing::debug;

/// Default bitmask reported for an existing entry: readable + writable.
const DEFAULT_ACCESS_MASK: i32 = 6;

#[derive(Debug, Clone)]
enum Entry {
    File(String),
    Folder,
}

/// In-memory [`NativeStore`].
///
/// Paths are opaque map keys; no hierarchy is enforced, which matches the
/// contract's no-normalization rule. Entries are files (whole text) or
/// folders (markers only).
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    masks: RwLock<HashMap<String, i32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the access bitmask reported for a path.
    ///
    /// The override applies only while an entry exists at the path;
    /// absent paths always report the sentinel.
    pub fn set_access_mask(&self, path: &str, mask: i32) {
        self.masks
            .write()
            .expect("mask lock poisoned")
            .insert(path.to_string(), mask);
        debug!(path = %path, mask, "Set access mask override");
    }

    fn with_entries<T>(&self, f: impl FnOnce(&HashMap<String, Entry>) -> T) -> T {
        f(&self.entries.read().expect("entry lock poisoned"))
    }

    fn with_entries_mut<T>(&self, f: impl FnOnce(&mut HashMap<String, Entry>) -> T) -> T {
        f(&mut self.entries.write().expect("entry lock poisoned"))
    }
}

impl NativeStore for MemoryStore {
    fn file_exists(&self, path: &str) -> bool {
        self.with_entries(|entries| entries.contains_key(path))
    }

    fn read_text(&self, path: &str) -> Result<String> {
        self.with_entries(|entries| match entries.get(path) {
            Some(Entry::File(text)) => Ok(text.clone()),
            Some(Entry::Folder) => Err(StoreError::OperationFailed(format!(
                "cannot read folder as text: {path}"
            ))),
            None => Err(StoreError::NotFound(path.to_string())),
        })
    }

    fn write_text(&self, path: &str, text: &str) -> Result<()> {
        self.with_entries_mut(|entries| match entries.get_mut(path) {
            Some(Entry::File(current)) => {
                *current = text.to_string();
                debug!(path = %path, len = text.len(), "Wrote text");
                Ok(())
            }
            Some(Entry::Folder) => Err(StoreError::OperationFailed(format!(
                "cannot write text to folder: {path}"
            ))),
            // Writes do not create entries; callers must create first.
            None => Err(StoreError::NotFound(path.to_string())),
        })
    }

    fn rename(&self, old_path: &str, new_path: &str) -> Result<()> {
        self.with_entries_mut(|entries| match entries.remove(old_path) {
            Some(entry) => {
                entries.insert(new_path.to_string(), entry);
                debug!(old = %old_path, new = %new_path, "Renamed entry");
                Ok(())
            }
            None => Err(StoreError::NotFound(old_path.to_string())),
        })
    }

    fn unlink(&self, path: &str) -> Result<()> {
        self.with_entries_mut(|entries| match entries.remove(path) {
            Some(_) => {
                debug!(path = %path, "Deleted entry");
                Ok(())
            }
            None => Err(StoreError::NotFound(path.to_string())),
        })
    }

    fn access_mask(&self, path: &str) -> i32 {
        if !self.file_exists(path) {
            return ACCESS_ABSENT;
        }
        self.masks
            .read()
            .expect("mask lock poisoned")
            .get(path)
            .copied()
            .unwrap_or(DEFAULT_ACCESS_MASK)
    }

    fn create_file(&self, path: &str) -> Result<()> {
        self.with_entries_mut(|entries| {
            if !entries.contains_key(path) {
                entries.insert(path.to_string(), Entry::File(String::new()));
                debug!(path = %path, "Created file entry");
            }
            Ok(())
        })
    }

    fn create_folder(&self, path: &str) -> Result<()> {
        self.with_entries_mut(|entries| match entries.get(path) {
            Some(Entry::File(_)) => Err(StoreError::OperationFailed(format!(
                "a file already occupies the path: {path}"
            ))),
            Some(Entry::Folder) => Ok(()),
            None => {
                entries.insert(path.to_string(), Entry::Folder);
                debug!(path = %path, "Created folder entry");
                Ok(())
            }
        })
    }
}
