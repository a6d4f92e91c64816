//! Debounced persistence of the editor state.
//!
//! The controller owns one storage key. Each change re-arms a quiet-period
//! debounce; when it elapses the latest live tree is canonicalized,
//! serialized and written. Writes whose canonical form did not change since
//! the last save are skipped, so adding or removing an annotation never
//! touches storage.
//!
//! ```text
//! on_change ─▶ Debouncer ──(quiet)──▶ save: canonicalize ─▶ to_json ─▶ fingerprint ─▶ store.write
//! ```

use std::borrow::Cow;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::debounce::Debouncer;
use crate::error::{CanonError, CanonResult};
use crate::hash::fingerprint;
use crate::node::Document;
use crate::phase::Live;
use crate::serialize;
use crate::store::SnapshotStore;
use crate::transform::canonicalize;

// =============================================================================
// PersistConfig
// =============================================================================

/// Default storage key.
pub const DEFAULT_STORAGE_KEY: &str = "lexical-editor-state";

/// Default suffix for the backup of an unreadable payload.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".corrupt";

/// Configuration for the persistence controller.
///
/// Deserializable so a host can keep it next to its own settings; missing
/// fields take their defaults.
///
/// ```
/// use std::time::Duration;
/// use canon_vdom::persist::PersistConfig;
///
/// let config: PersistConfig = serde_json::from_str(r#"{"debounceMs": 250}"#).unwrap();
/// assert_eq!(config.debounce(), Duration::from_millis(250));
/// assert_eq!(config.key(), "lexical-editor-state");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistConfig {
    /// Storage key holding the canonical JSON.
    pub key: Cow<'static, str>,
    /// Quiet period before a save, in milliseconds.
    pub debounce_ms: u64,
    /// Copy an unreadable payload aside before falling back.
    pub backup_corrupt: bool,
    /// Suffix appended to `key` for that copy.
    pub backup_suffix: Cow<'static, str>,
}

impl PersistConfig {
    /// One-second debounce under the default key, with corrupt backups.
    pub const DEFAULT: Self = Self {
        key: Cow::Borrowed(DEFAULT_STORAGE_KEY),
        debounce_ms: 1000,
        backup_corrupt: true,
        backup_suffix: Cow::Borrowed(DEFAULT_BACKUP_SUFFIX),
    };

    /// Create the default config.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Cow::Owned(key.into());
        self
    }

    /// Set the debounce interval.
    pub fn with_debounce(mut self, interval: Duration) -> Self {
        self.debounce_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Enable or disable the corrupt-payload backup.
    pub fn with_backup_corrupt(mut self, enabled: bool) -> Self {
        self.backup_corrupt = enabled;
        self
    }

    /// Set the backup suffix.
    pub fn with_backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.backup_suffix = Cow::Owned(suffix.into());
        self
    }

    /// Storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Debounce interval.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Key the corrupt payload is copied to.
    pub fn backup_key(&self) -> String {
        format!("{}{}", self.key, self.backup_suffix)
    }
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Relationship between the editor and the stored key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    /// Nothing usable is stored.
    #[default]
    Empty,
    /// The editor was initialized from the stored value.
    Loaded,
    /// Changes are waiting to be written (or the last write failed).
    Dirty,
    /// The stored value matches the last saved snapshot.
    Saved,
}

/// Result of [`PersistController::load`].
#[derive(Debug)]
pub enum LoadOutcome {
    /// No stored state, or the store could not be read.
    Nothing,
    /// The stored state, ready for the editing surface.
    Loaded(Document<Live>),
    /// The stored payload was unreadable; `doc` is the empty-paragraph fallback.
    Recovered { doc: Document<Live>, error: CanonError },
}

impl LoadOutcome {
    /// The tree to apply, if any.
    pub fn document(&self) -> Option<&Document<Live>> {
        match self {
            LoadOutcome::Nothing => None,
            LoadOutcome::Loaded(doc) | LoadOutcome::Recovered { doc, .. } => Some(doc),
        }
    }
}

/// Result of one save attempt.
#[derive(Debug)]
pub enum SaveOutcome {
    /// The canonical JSON was written.
    Written,
    /// The canonical form matched the last save; nothing was written.
    Unchanged,
    /// Serialization or the store write failed. Not retried.
    Failed(CanonError),
}

impl SaveOutcome {
    /// Whether the store was written.
    #[inline]
    pub fn is_written(&self) -> bool {
        matches!(self, SaveOutcome::Written)
    }

    /// Whether the attempt failed.
    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, SaveOutcome::Failed(_))
    }
}

// =============================================================================
// PersistController
// =============================================================================

/// Loads, debounces and saves the editor state under one key.
///
/// `I` is the clock type of the debounce; the `*_at` methods take the
/// current time explicitly, the plain ones read `Instant::now()`.
#[derive(Debug)]
pub struct PersistController<S, I = Instant> {
    config: PersistConfig,
    store: S,
    debounce: Debouncer<Document<Live>, I>,
    last_saved: Option<u64>,
    state: SlotState,
}

impl<S, I> PersistController<S, I>
where
    S: SnapshotStore,
    I: Copy + Ord + std::ops::Add<Duration, Output = I>,
{
    /// Create a controller over `store`.
    pub fn new(store: S, config: PersistConfig) -> Self {
        Self {
            debounce: Debouncer::new(config.debounce()),
            config,
            store,
            last_saved: None,
            state: SlotState::Empty,
        }
    }

    /// Read the stored state.
    ///
    /// Never fails: a read error counts as nothing stored, and an unreadable
    /// payload yields the fallback tree (after an optional backup copy).
    pub fn load(&mut self) -> LoadOutcome {
        let key = self.config.key();
        let raw = match self.store.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key, "no persisted editor state");
                return LoadOutcome::Nothing;
            }
            Err(err) => {
                tracing::error!(key, error = %err, "failed to read persisted editor state");
                return LoadOutcome::Nothing;
            }
        };

        match serialize::from_json::<Live>(&raw) {
            Ok(doc) => {
                // stored bytes, not the reparsed tree: a non-canonical payload gets rewritten
                self.last_saved = Some(fingerprint(&raw));
                self.state = SlotState::Loaded;
                tracing::info!(key, bytes = raw.len(), "loaded persisted editor state");
                LoadOutcome::Loaded(doc)
            }
            Err(error) => {
                tracing::warn!(key, %error, "persisted editor state is unreadable, starting empty");
                if self.config.backup_corrupt {
                    self.backup(&raw);
                }
                self.last_saved = None;
                self.state = SlotState::Empty;
                LoadOutcome::Recovered {
                    doc: Document::empty_paragraph(),
                    error,
                }
            }
        }
    }

    fn backup(&self, raw: &str) {
        let backup_key = self.config.backup_key();
        match self.store.write(&backup_key, raw) {
            Ok(()) => tracing::info!(key = %backup_key, "backed up unreadable editor state"),
            Err(err) => tracing::warn!(key = %backup_key, error = %err, "failed to back up unreadable editor state"),
        }
    }

    /// Record a change at `now`. Replaces any pending snapshot.
    pub fn on_change_at(&mut self, snapshot: Document<Live>, now: I) {
        self.debounce.push(snapshot, now);
        self.state = SlotState::Dirty;
    }

    /// Save the pending snapshot if its quiet period elapsed by `now`.
    pub fn poll_at(&mut self, now: I) -> Option<SaveOutcome> {
        let snapshot = self.debounce.poll(now)?;
        Some(self.save(&snapshot))
    }

    /// Save the pending snapshot immediately.
    pub fn flush(&mut self) -> Option<SaveOutcome> {
        let snapshot = self.debounce.take()?;
        Some(self.save(&snapshot))
    }

    /// Canonicalize, serialize and write `snapshot`.
    ///
    /// Errors are logged and reported, never retried here; the state stays
    /// `Dirty` so the next debounced save writes again.
    pub fn save(&mut self, snapshot: &Document<Live>) -> SaveOutcome {
        let key = self.config.key();
        let canonical = canonicalize(snapshot);
        let json = match serialize::to_json(&canonical) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(key, error = %err, "failed to serialize editor state");
                self.state = SlotState::Dirty;
                return SaveOutcome::Failed(err);
            }
        };

        let print = fingerprint(&json);
        if self.last_saved == Some(print) {
            tracing::debug!(key, "canonical editor state unchanged, skipping write");
            self.state = SlotState::Saved;
            return SaveOutcome::Unchanged;
        }

        match self.store.write(key, &json) {
            Ok(()) => {
                tracing::info!(key, bytes = json.len(), "saved editor state");
                self.last_saved = Some(print);
                self.state = SlotState::Saved;
                SaveOutcome::Written
            }
            Err(err) => {
                tracing::error!(key, error = %err, "failed to save editor state");
                self.state = SlotState::Dirty;
                SaveOutcome::Failed(err.into())
            }
        }
    }

    /// Remove the stored state and drop any pending save.
    ///
    /// Idempotent. A store failure is logged and returned.
    pub fn clear(&mut self) -> CanonResult<()> {
        let key = self.config.key();
        let dropped = self.debounce.cancel();
        self.last_saved = None;
        self.state = SlotState::Empty;

        match self.store.remove(key) {
            Ok(()) => {
                tracing::info!(key, dropped_pending = dropped, "cleared persisted editor state");
                Ok(())
            }
            Err(err) => {
                tracing::error!(key, error = %err, "failed to clear persisted editor state");
                Err(err.into())
            }
        }
    }

    /// Current slot state.
    #[inline]
    pub fn state(&self) -> SlotState {
        self.state
    }

    /// Whether a save is waiting for its quiet period.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// When the pending save becomes due.
    #[inline]
    pub fn deadline(&self) -> Option<I> {
        self.debounce.deadline()
    }

    /// Fingerprint of the last written (or loaded) canonical JSON.
    #[inline]
    pub fn last_fingerprint(&self) -> Option<u64> {
        self.last_saved
    }

    #[inline]
    pub fn config(&self) -> &PersistConfig {
        &self.config
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: SnapshotStore> PersistController<S, Instant> {
    /// Record a change now.
    pub fn on_change(&mut self, snapshot: Document<Live>) {
        self.on_change_at(snapshot, Instant::now());
    }

    /// Save the pending snapshot if its quiet period has elapsed.
    pub fn poll(&mut self) -> Option<SaveOutcome> {
        self.poll_at(Instant::now())
    }
}
