//! Directory-backed snapshot store.

use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreOp};

use super::SnapshotStore;

const EXTENSION: &str = "json";

/// One UTF-8 file per key inside a directory.
///
/// Writes go to a sibling temporary file first and are renamed into place,
/// so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::io(StoreOp::Write, dir.display().to_string(), e))?;
        Ok(Self { dir })
    }

    /// Directory holding the files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{EXTENSION}", file_stem(key)))
    }
}

/// Map a key to a file stem.
///
/// ASCII alphanumerics, `-` and `.` pass through; every other byte becomes
/// `_XX` (hex), so distinct keys never share a file.
fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'.' {
            stem.push(byte as char);
        } else {
            let _ = write!(stem, "_{byte:02X}");
        }
    }
    stem
}

impl SnapshotStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(StoreOp::Read, key, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));
        fs::write(&tmp, value).map_err(|e| StoreError::io(StoreOp::Write, key, e))?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StoreError::io(StoreOp::Write, key, e)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(StoreOp::Remove, key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_stem_sanitizes() {
        assert_eq!(file_stem("lexical-editor-state"), "lexical-editor-state");
        assert_eq!(file_stem("a/b"), "a_2Fb");
        assert_eq!(file_stem("a_b"), "a_5Fb");
        assert_ne!(file_stem("a/b"), file_stem("a_2Fb"));
        assert_eq!(file_stem("é"), "_C3_A9");
    }

    #[test]
    fn test_open_creates_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("state").join("editor");
        let store = FileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[test]
    fn test_values_land_in_key_files() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        store.write("lexical-editor-state", "{\"root\":{}}").unwrap();
        let path = temp.path().join("lexical-editor-state.json");
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"root\":{}}");

        store.write("lexical-editor-state.corrupt", "garbage").unwrap();
        assert!(temp.path().join("lexical-editor-state.corrupt.json").exists());

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp = TempDir::new().unwrap();
        FileStore::open(temp.path()).unwrap().write("k", "persisted").unwrap();
        let reopened = FileStore::open(temp.path()).unwrap();
        assert_eq!(reopened.read("k").unwrap().as_deref(), Some("persisted"));
    }
}
