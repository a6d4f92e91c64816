//! In-process snapshot store.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::{StoreError, StoreOp};

use super::SnapshotStore;

/// Non-thread-safe snapshot map.
pub type SnapshotMap = FxHashMap<String, String>;

/// Thread-safe shared snapshot store.
///
/// Clones share the same map, so a test (or a second session) can observe
/// what a controller wrote. Uses `parking_lot::RwLock` for better
/// performance under contention.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<SnapshotMap>>,
    read_only: bool,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A view of the same map whose writes and removals fail.
    ///
    /// Models a storage quota or a disabled backend.
    pub fn read_only(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            read_only: true,
        }
    }

    /// Execute a closure with read access to the map.
    pub fn with_read<R>(&self, f: impl FnOnce(&SnapshotMap) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with write access to the map.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut SnapshotMap) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Get the number of stored keys.
    pub fn len(&self) -> usize {
        self.with_read(|m| m.len())
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self, op: StoreOp, key: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::new(op, key, "store is read-only"));
        }
        Ok(())
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.with_read(|m| m.get(key).cloned()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable(StoreOp::Write, key)?;
        self.with_write(|m| {
            m.insert(key.to_owned(), value.to_owned());
        });
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable(StoreOp::Remove, key)?;
        self.with_write(|m| {
            m.remove(key);
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.write("a", "1").unwrap();
        assert_eq!(other.read("a").unwrap().as_deref(), Some("1"));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_read_only_view() {
        let store = MemoryStore::new();
        store.write("a", "1").unwrap();
        let ro = store.read_only();

        assert_eq!(ro.read("a").unwrap().as_deref(), Some("1"));
        let err = ro.write("a", "2").unwrap_err();
        assert_eq!(err.op, StoreOp::Write);
        assert_eq!(err.key, "a");
        assert!(ro.remove("a").is_err());
        assert_eq!(store.read("a").unwrap().as_deref(), Some("1"));
    }
}
