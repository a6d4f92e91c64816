//! Key-value snapshot storage.
//!
//! The persistence controller writes one UTF-8 payload under one key. A
//! store only has to read, write and remove whole values; there is no
//! listing or partial update.
//!
//! # Backends
//!
//! - [`MemoryStore`] - shared in-process map, the session-storage analogue
//! - [`FileStore`] - one file per key inside a directory

mod file;
mod memory;

use std::sync::Arc;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;

use crate::error::StoreError;

/// Storage backend for serialized documents.
pub trait SnapshotStore: Send + Sync {
    /// Read the value under `key`, `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Whether a value exists under `key`.
    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        self.read(key).map(|v| v.is_some())
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    #[inline]
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    #[inline]
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    #[inline]
    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    #[inline]
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    #[inline]
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    #[inline]
    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
