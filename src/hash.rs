//! Deterministic hashing of serialized documents.
//!
//! Uses blake3 so fingerprints agree across process restarts; the persistence
//! controller compares them to skip writes whose payload did not change.

use crate::node::Document;
use crate::phase::Phase;
use crate::serialize;

// =============================================================================
// StableHasher - Builder Pattern
// =============================================================================

/// A deterministic hasher using blake3
///
/// Unlike `std::hash::Hasher`, this produces the same output across
/// process restarts for the same input.
pub struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    /// Create a new StableHasher
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Update with raw bytes
    #[inline]
    pub fn update(mut self, data: &[u8]) -> Self {
        self.inner.update(data);
        self
    }

    /// Finish and return the hash as u64
    ///
    /// Takes the first 8 bytes of blake3 output as little-endian u64.
    #[inline]
    pub fn finish(self) -> u64 {
        let hash = self.inner.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }
}

impl Default for StableHasher {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Fingerprints
// =============================================================================

/// Fingerprint of a serialized payload.
#[inline]
pub fn fingerprint(payload: &str) -> u64 {
    StableHasher::new().update(payload.as_bytes()).finish()
}

/// Fingerprint of a document's compact JSON form.
///
/// Returns `None` only if the document cannot be serialized.
pub fn document_fingerprint<P: Phase>(doc: &Document<P>) -> Option<u64> {
    serialize::to_json(doc).ok().map(|json| fingerprint(&json))
}
