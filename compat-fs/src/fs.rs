//! The compat layer itself.
//!
//! Every operation exists in two call shapes backed by one internal
//! synchronous function: a `*_sync` form that returns or errors directly,
//! and a callback form that invokes its completion callback on the same
//! call stack before returning. Nothing is ever deferred or queued; the
//! substrate is synchronous under the hood.
//!
//! # Concurrency
//!
//! The layer adds no locking on top of the store. The two-step sequences
//! (`write_file`'s create-then-write, `append_file`'s read-modify-write)
//! are not atomic: a concurrent writer can interleave between the steps
//! and lose its change. That is a limitation of the substrate, not of
//! this layer, and it is preserved rather than papered over.

use store_traits::{NativeStore, ACCESS_ABSENT};
use tracing::{debug, warn};

use crate::error::{CompatError, Result};
use crate::mode::AccessMode;
use crate::stat::{SyntheticStat, SYNTHETIC_STAT};

/// Node-style filesystem surface over a [`NativeStore`].
///
/// Holds no cached handles and no descriptor table; each operation is a
/// single pass through the store.
///
/// # Example
///
/// ```ignore
/// use compat_fs::CompatFs;
/// use store_memory::MemoryStore;
///
/// let fs = CompatFs::new(MemoryStore::new());
/// fs.write_file_sync("/notes.txt", "hello")?;
/// assert_eq!(fs.read_file_sync("/notes.txt").as_deref(), Some("hello"));
/// ```
pub struct CompatFs<S> {
    store: S,
}

impl<S: NativeStore> CompatFs<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ------------------------------------------------------------------
    // Existence & access control
    // ------------------------------------------------------------------

    /// Whether any entry exists at the path. Never fails.
    pub fn exists_sync(&self, path: &str) -> bool {
        self.store.file_exists(path)
    }

    /// Callback form of [`exists_sync`](CompatFs::exists_sync).
    pub fn exists(&self, path: &str, callback: impl FnOnce(bool)) {
        callback(self.exists_sync(path));
    }

    fn check_access(&self, path: &str, mode: AccessMode) -> bool {
        let mask = self.store.access_mask(path);
        if mask == ACCESS_ABSENT {
            return false;
        }
        mode.satisfied_by(mask)
    }

    /// Check the path against the requested access bits.
    ///
    /// Fails with [`CompatError::NoAccess`] when the entry is absent or
    /// any requested bit is missing from the substrate's mask.
    pub fn access_sync(&self, path: &str, mode: AccessMode) -> Result<()> {
        if self.check_access(path, mode) {
            Ok(())
        } else {
            Err(CompatError::NoAccess)
        }
    }

    /// Callback form of [`access_sync`](CompatFs::access_sync).
    ///
    /// An omitted `mode` resolves to [`AccessMode::F_OK`] here at the
    /// boundary; nothing downstream inspects argument shapes.
    pub fn access(&self, path: &str, mode: Option<AccessMode>, callback: impl FnOnce(Result<()>)) {
        callback(self.access_sync(path, mode.unwrap_or(AccessMode::F_OK)));
    }

    // ------------------------------------------------------------------
    // Rename & deletion
    // ------------------------------------------------------------------

    fn do_rename(&self, old_path: &str, new_path: &str) -> Result<()> {
        self.store.rename(old_path, new_path)?;
        debug!(old = %old_path, new = %new_path, "Renamed entry");
        Ok(())
    }

    /// Rename an entry. The callback receives the outcome of the single
    /// native rename, success or failure alike.
    pub fn rename(&self, old_path: &str, new_path: &str, callback: impl FnOnce(Result<()>)) {
        callback(self.do_rename(old_path, new_path));
    }

    /// Fire-and-forget rename.
    ///
    /// The caller gets no error signal; a failure is only observable in
    /// the log.
    pub fn rename_sync(&self, old_path: &str, new_path: &str) {
        if let Err(err) = self.do_rename(old_path, new_path) {
            warn!(old = %old_path, new = %new_path, error = %err, "rename_sync failed");
        }
    }

    fn do_unlink(&self, path: &str) -> Result<()> {
        self.store.unlink(path)?;
        debug!(path = %path, "Deleted entry");
        Ok(())
    }

    /// Delete an entry, forwarding any native failure to the callback.
    pub fn unlink(&self, path: &str, callback: impl FnOnce(Result<()>)) {
        callback(self.do_unlink(path));
    }

    /// Delete an entry, reporting success as a bare boolean.
    ///
    /// The lossy contract is deliberate; the dropped error detail goes to
    /// the log instead.
    pub fn unlink_sync(&self, path: &str) -> bool {
        match self.do_unlink(path) {
            Ok(()) => true,
            Err(err) => {
                warn!(path = %path, error = %err, "unlink_sync failed");
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Metadata synthesis
    // ------------------------------------------------------------------

    fn do_stat(&self, path: &str) -> Result<SyntheticStat> {
        if self.store.file_exists(path) {
            Ok(SYNTHETIC_STAT)
        } else {
            Err(CompatError::NotFound {
                syscall: "stat",
                path: path.to_string(),
            })
        }
    }

    /// Stat an entry.
    ///
    /// Branches solely on existence: any existing path yields
    /// [`SYNTHETIC_STAT`], a missing path yields the ENOENT-shaped error.
    pub fn stat(&self, path: &str, callback: impl FnOnce(Result<SyntheticStat>)) {
        callback(self.do_stat(path));
    }

    /// Synchronous stat: `None` when the path does not exist.
    pub fn stat_sync(&self, path: &str) -> Option<SyntheticStat> {
        self.do_stat(path).ok()
    }

    // ------------------------------------------------------------------
    // Read / write / append (text only)
    // ------------------------------------------------------------------

    fn do_read(&self, path: &str) -> Result<String> {
        let text = self.store.read_text(path)?;
        debug!(path = %path, len = text.len(), "Read file");
        Ok(text)
    }

    /// Read the whole file as text, forwarding any native failure.
    pub fn read_file(&self, path: &str, callback: impl FnOnce(Result<String>)) {
        callback(self.do_read(path));
    }

    /// Synchronous read: whatever text was produced, `None` on failure.
    pub fn read_file_sync(&self, path: &str) -> Option<String> {
        match self.do_read(path) {
            Ok(text) => Some(text),
            Err(err) => {
                debug!(path = %path, error = %err, "read_file_sync produced no text");
                None
            }
        }
    }

    fn do_write(&self, path: &str, data: &str) -> Result<()> {
        // Writes to a nonexistent native entry are not guaranteed to
        // succeed, so the entry is created first.
        if !self.store.file_exists(path) {
            self.store.create_file(path)?;
        }
        self.store.write_text(path, data)?;
        debug!(path = %path, len = data.len(), "Wrote file");
        Ok(())
    }

    /// Replace the whole file with `data`, creating the entry if absent.
    pub fn write_file(&self, path: &str, data: &str, callback: impl FnOnce(Result<()>)) {
        callback(self.do_write(path, data));
    }

    /// Synchronous form of [`write_file`](CompatFs::write_file).
    pub fn write_file_sync(&self, path: &str, data: &str) -> Result<()> {
        self.do_write(path, data)
    }

    /// Thin alias for [`write_file`](CompatFs::write_file).
    ///
    /// `position` and `encoding` are accepted for surface compatibility
    /// and ignored: there are no partial-offset writes and no encodings
    /// beyond text.
    pub fn write(
        &self,
        file: &str,
        data: &str,
        position: Option<u64>,
        encoding: Option<&str>,
        callback: impl FnOnce(Result<()>),
    ) {
        if position.is_some() || encoding.is_some() {
            debug!(file = %file, ?position, ?encoding, "write ignores position and encoding");
        }
        self.write_file(file, data, callback);
    }

    fn do_append(&self, path: &str, data: &str) -> Result<()> {
        if !self.store.file_exists(path) {
            self.store.create_file(path)?;
        }
        // Absent or unreadable contents count as empty; the write step
        // reports real failures. Not atomic: a concurrent write landing
        // between the read and the write below is overwritten.
        let current = self.store.read_text(path).unwrap_or_default();
        self.store.write_text(path, &(current + data))?;
        debug!(path = %path, appended = data.len(), "Appended to file");
        Ok(())
    }

    /// Append `data` to the file, creating the entry if absent.
    pub fn append_file(&self, path: &str, data: &str, callback: impl FnOnce(Result<()>)) {
        callback(self.do_append(path, data));
    }

    /// Synchronous form of [`append_file`](CompatFs::append_file).
    pub fn append_file_sync(&self, path: &str, data: &str) -> Result<()> {
        self.do_append(path, data)
    }

    // ------------------------------------------------------------------
    // Directories
    // ------------------------------------------------------------------

    fn do_mkdir(&self, path: &str) -> Result<()> {
        self.store.create_folder(path)?;
        debug!(path = %path, "Created folder");
        Ok(())
    }

    /// Create a folder entry. `mode` is accepted and has no effect; the
    /// substrate has no permission semantics.
    pub fn mkdir(&self, path: &str, mode: Option<u32>, callback: impl FnOnce(Result<()>)) {
        if let Some(mode) = mode {
            debug!(path = %path, mode, "mkdir ignores mode");
        }
        callback(self.do_mkdir(path));
    }

    /// Synchronous form of [`mkdir`](CompatFs::mkdir).
    pub fn mkdir_sync(&self, path: &str, mode: Option<u32>) -> Result<()> {
        if let Some(mode) = mode {
            debug!(path = %path, mode, "mkdir_sync ignores mode");
        }
        self.do_mkdir(path)
    }

    // ------------------------------------------------------------------
    // Explicit non-support
    // ------------------------------------------------------------------

    /// Always fails: the substrate cannot truncate.
    pub fn truncate(&self, _path: &str, _len: u64) -> Result<()> {
        Err(CompatError::NotImplemented)
    }

    /// Always fails: the substrate cannot truncate.
    pub fn truncate_sync(&self, path: &str, len: u64) -> Result<()> {
        self.truncate(path, len)
    }

    /// Always fails: the substrate has no ownership.
    pub fn chown(&self, _path: &str, _uid: u32, _gid: u32) -> Result<()> {
        Err(CompatError::NotImplemented)
    }

    /// Always fails: the substrate has no ownership.
    pub fn chown_sync(&self, path: &str, uid: u32, gid: u32) -> Result<()> {
        self.chown(path, uid, gid)
    }

    /// Always fails: the substrate has no permission bits.
    pub fn chmod(&self, _path: &str, _mode: u32) -> Result<()> {
        Err(CompatError::NotImplemented)
    }

    /// Always fails: the substrate has no permission bits.
    pub fn chmod_sync(&self, path: &str, mode: u32) -> Result<()> {
        self.chmod(path, mode)
    }

    /// Inert stub: there are no real descriptors to hand out.
    ///
    /// Returns `None` where a descriptor would go; callers that depend on
    /// a real descriptor value will malfunction, so the call is logged.
    pub fn open_sync(&self, path: &str, flags: &str) -> Option<i32> {
        warn!(path = %path, flags = %flags, "open_sync not implemented, no descriptor returned");
        None
    }

    /// Inert stub: nothing was ever opened.
    pub fn close_sync(&self, fd: i32) {
        warn!(fd, "close_sync not implemented");
    }

    /// Inert stub: the substrate has no timestamps to set.
    pub fn futimes_sync(&self, fd: i32, atime: i64, mtime: i64) {
        warn!(fd, atime, mtime, "futimes_sync not implemented");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;
    use std::cell::Cell;
    use store_traits::{Result as StoreResult, StoreError};

    mock! {
        Store {}

        impl NativeStore for Store {
            fn file_exists(&self, path: &str) -> bool;
            fn read_text(&self, path: &str) -> StoreResult<String>;
            fn write_text(&self, path: &str, text: &str) -> StoreResult<()>;
            fn rename(&self, old_path: &str, new_path: &str) -> StoreResult<()>;
            fn unlink(&self, path: &str) -> StoreResult<()>;
            fn access_mask(&self, path: &str) -> i32;
            fn create_file(&self, path: &str) -> StoreResult<()>;
            fn create_folder(&self, path: &str) -> StoreResult<()>;
        }
    }

    fn layer(store: MockStore) -> CompatFs<MockStore> {
        CompatFs::new(store)
    }

    #[test]
    fn access_defaults_to_existence_only() {
        let mut store = MockStore::new();
        // Mask with no permission bits still satisfies F_OK.
        store.expect_access_mask().with(eq("/f")).return_const(0);
        let fs = layer(store);

        let called = Cell::new(false);
        fs.access("/f", None, |result| {
            assert!(result.is_ok());
            called.set(true);
        });
        assert!(called.get(), "callback must fire on the same call stack");
    }

    #[test]
    fn access_sync_fails_when_a_requested_bit_is_missing() {
        let mut store = MockStore::new();
        store.expect_access_mask().return_const(4);
        let fs = layer(store);

        let err = fs
            .access_sync("/f", AccessMode::W_OK)
            .unwrap_err();
        assert_eq!(err.to_string(), "No Access");
    }

    #[test]
    fn access_sync_passes_when_all_bits_are_present() {
        let mut store = MockStore::new();
        store.expect_access_mask().return_const(6);
        let fs = layer(store);

        assert!(fs
            .access_sync("/f", AccessMode::R_OK | AccessMode::W_OK)
            .is_ok());
    }

    #[test]
    fn access_sync_fails_on_the_absent_sentinel_even_for_f_ok() {
        let mut store = MockStore::new();
        store.expect_access_mask().return_const(ACCESS_ABSENT);
        let fs = layer(store);

        assert!(fs.access_sync("/f", AccessMode::F_OK).is_err());
    }

    #[test]
    fn rename_delivers_the_outcome_to_one_callback() {
        let mut store = MockStore::new();
        store
            .expect_rename()
            .with(eq("/a"), eq("/b"))
            .returning(|_, _| Ok(()));
        store
            .expect_rename()
            .with(eq("/missing"), eq("/b"))
            .returning(|old, _| Err(StoreError::NotFound(old.to_string())));
        let fs = layer(store);

        fs.rename("/a", "/b", |result| assert!(result.is_ok()));
        fs.rename("/missing", "/b", |result| {
            assert!(matches!(
                result.unwrap_err(),
                CompatError::Store(StoreError::NotFound(_))
            ));
        });
    }

    #[test]
    fn rename_sync_swallows_the_error() {
        let mut store = MockStore::new();
        store
            .expect_rename()
            .returning(|old, _| Err(StoreError::NotFound(old.to_string())));
        let fs = layer(store);

        // No signal to the caller; must not panic.
        fs.rename_sync("/missing", "/b");
    }

    #[test]
    fn unlink_sync_maps_outcomes_to_booleans() {
        let mut store = MockStore::new();
        store.expect_unlink().times(1).returning(|_| Ok(()));
        store
            .expect_unlink()
            .times(1)
            .returning(|path| Err(StoreError::NotFound(path.to_string())));
        let fs = layer(store);

        assert!(fs.unlink_sync("/f"));
        assert!(!fs.unlink_sync("/f"));
    }

    #[test]
    fn stat_synthesizes_a_constant_record_for_existing_paths() {
        let mut store = MockStore::new();
        store.expect_file_exists().return_const(true);
        let fs = layer(store);

        fs.stat("/any", |result| {
            assert_eq!(result.unwrap(), SYNTHETIC_STAT);
        });
        assert_eq!(fs.stat_sync("/any"), Some(SYNTHETIC_STAT));
    }

    #[test]
    fn stat_reports_enoent_shape_for_missing_paths() {
        let mut store = MockStore::new();
        store.expect_file_exists().return_const(false);
        let fs = layer(store);

        fs.stat("/missing", |result| {
            let err = result.unwrap_err();
            assert_eq!(err.errno(), Some(-2));
            assert_eq!(err.code(), Some("ENOENT"));
            assert_eq!(err.syscall(), Some("stat"));
            assert_eq!(err.path(), Some("/missing"));
        });
        assert_eq!(fs.stat_sync("/missing"), None);
    }

    #[test]
    fn write_pre_creates_only_when_the_entry_is_absent() {
        let mut store = MockStore::new();
        store
            .expect_file_exists()
            .with(eq("/new.txt"))
            .return_const(false);
        store
            .expect_create_file()
            .with(eq("/new.txt"))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_write_text()
            .with(eq("/new.txt"), eq("x"))
            .returning(|_, _| Ok(()));
        let fs = layer(store);

        assert!(fs.write_file_sync("/new.txt", "x").is_ok());
    }

    #[test]
    fn write_skips_creation_for_existing_entries() {
        let mut store = MockStore::new();
        store.expect_file_exists().return_const(true);
        // No expect_create_file: a creation call would fail the test.
        store
            .expect_write_text()
            .returning(|_, _| Ok(()));
        let fs = layer(store);

        assert!(fs.write_file_sync("/old.txt", "x").is_ok());
    }

    #[test]
    fn write_alias_ignores_position_and_encoding() {
        let mut store = MockStore::new();
        store.expect_file_exists().return_const(true);
        store
            .expect_write_text()
            .with(eq("/f"), eq("data"))
            .returning(|_, _| Ok(()));
        let fs = layer(store);

        let called = Cell::new(false);
        fs.write("/f", "data", Some(42), Some("latin1"), |result| {
            assert!(result.is_ok());
            called.set(true);
        });
        assert!(called.get());
    }

    #[test]
    fn append_concatenates_onto_existing_contents() {
        let mut store = MockStore::new();
        store.expect_file_exists().return_const(true);
        store
            .expect_read_text()
            .returning(|_| Ok("a".to_string()));
        store
            .expect_write_text()
            .with(eq("/f"), eq("ab"))
            .times(1)
            .returning(|_, _| Ok(()));
        let fs = layer(store);

        assert!(fs.append_file_sync("/f", "b").is_ok());
    }

    #[test]
    fn append_treats_unreadable_contents_as_empty() {
        let mut store = MockStore::new();
        store.expect_file_exists().return_const(true);
        store
            .expect_read_text()
            .returning(|path| Err(StoreError::OperationFailed(path.to_string())));
        store
            .expect_write_text()
            .with(eq("/f"), eq("b"))
            .returning(|_, _| Ok(()));
        let fs = layer(store);

        assert!(fs.append_file_sync("/f", "b").is_ok());
    }

    #[test]
    fn read_file_forwards_the_native_error() {
        let mut store = MockStore::new();
        store
            .expect_read_text()
            .returning(|path| Err(StoreError::NotFound(path.to_string())));
        let fs = layer(store);

        fs.read_file("/missing", |result| assert!(result.is_err()));
        assert_eq!(fs.read_file_sync("/missing"), None);
    }

    #[test]
    fn mkdir_forwards_creation_failures() {
        let mut store = MockStore::new();
        store
            .expect_create_folder()
            .returning(|path| Err(StoreError::OperationFailed(path.to_string())));
        let fs = layer(store);

        fs.mkdir("/f", Some(0o755), |result| assert!(result.is_err()));
    }

    #[test]
    fn unsupported_operations_always_fail() {
        let fs = layer(MockStore::new());

        assert!(matches!(
            fs.truncate("/f", 0).unwrap_err(),
            CompatError::NotImplemented
        ));
        assert!(matches!(
            fs.truncate_sync("/missing", 10).unwrap_err(),
            CompatError::NotImplemented
        ));
        assert!(fs.chown("/f", 0, 0).is_err());
        assert!(fs.chown_sync("/f", 501, 20).is_err());
        assert!(fs.chmod("/f", 0o644).is_err());
        assert!(fs.chmod_sync("/f", 0o644).is_err());
    }

    #[test]
    fn inert_stubs_do_nothing() {
        let fs = layer(MockStore::new());

        assert_eq!(fs.open_sync("/f", "r"), None);
        fs.close_sync(3);
        fs.futimes_sync(3, 0, 0);
    }
}
