//! Native Store Contract
//!
//! The trait every storage substrate must implement for the compat layer.
//! The substrate is deliberately narrow: whole-file text read/write,
//! existence checks, rename, deletion, entry creation, and a best-effort
//! access bitmask. There are no file descriptors, no partial I/O, no real
//! metadata, and no permission semantics beyond the bitmask.

use crate::error::Result;

/// Sentinel returned by [`NativeStore::access_mask`] when no entry exists
/// at the path.
pub const ACCESS_ABSENT: i32 = -1;

/// Restricted filesystem substrate.
///
/// Paths are opaque strings: implementations must not normalize, resolve,
/// or otherwise reinterpret them. All operations are synchronous and
/// whole-file; a write replaces the entire contents of an entry.
///
/// # Example
///
/// ```ignore
/// use store_traits::NativeStore;
///
/// fn copy_entry(store: &dyn NativeStore, from: &str, to: &str) -> store_traits::Result<()> {
///     let text = store.read_text(from)?;
///     store.create_file(to)?;
///     store.write_text(to, &text)
/// }
/// ```
pub trait NativeStore: Send + Sync {
    /// Check whether any entry (file or folder) exists at the path.
    fn file_exists(&self, path: &str) -> bool;

    /// Read the entire text contents of a file.
    ///
    /// # Errors
    /// - `NotFound` if no entry exists at the path
    /// - `OperationFailed` if the entry cannot be read as text
    fn read_text(&self, path: &str) -> Result<String>;

    /// Replace the entire contents of an existing file.
    ///
    /// Writing to a path with no entry is not guaranteed to succeed;
    /// callers that want create-on-write must call [`create_file`] first.
    ///
    /// [`create_file`]: NativeStore::create_file
    fn write_text(&self, path: &str, text: &str) -> Result<()>;

    /// Move the entry at `old_path` to `new_path`.
    ///
    /// An existing entry at `new_path` is overwritten.
    ///
    /// # Errors
    /// - `NotFound` if no entry exists at `old_path`
    fn rename(&self, old_path: &str, new_path: &str) -> Result<()>;

    /// Delete the entry at the path.
    ///
    /// # Errors
    /// - `NotFound` if no entry exists at the path
    fn unlink(&self, path: &str) -> Result<()>;

    /// Best-effort permission bitmask for the path.
    ///
    /// Returns [`ACCESS_ABSENT`] when no entry exists. The bitmask is not
    /// derived from real OS permissions; it is whatever the substrate can
    /// report.
    fn access_mask(&self, path: &str) -> i32;

    /// Create an empty file entry at the path.
    ///
    /// Idempotent: an existing file is left untouched.
    fn create_file(&self, path: &str) -> Result<()>;

    /// Create a folder entry at the path.
    ///
    /// Idempotent for existing folders.
    ///
    /// # Errors
    /// - `OperationFailed` if a file already occupies the path
    fn create_folder(&self, path: &str) -> Result<()>;
}
