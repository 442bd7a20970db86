use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::core::PulseError;

/// A flat named-key → string-list store.
///
/// This is the persistence collaborator behind [`BookmarkStore`](super::BookmarkStore).
/// Implementations report failures as [`PulseError::Persistence`]; callers decide
/// whether those matter.
pub trait KeyValueStore: Send + Sync {
    /// Read the list stored under `key`, or `None` when nothing was ever written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or decoded.
    fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>, PulseError>;

    /// Replace the list stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set_string_list(&self, key: &str, values: &[String]) -> Result<(), PulseError>;
}

/// Process-lifetime store. Useful in tests and as a session-only fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>, PulseError> {
        let guard = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(key).cloned())
    }

    fn set_string_list(&self, key: &str, values: &[String]) -> Result<(), PulseError> {
        let mut guard = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key.to_string(), values.to_vec());
        Ok(())
    }
}

/// A single JSON document on disk mapping each key to its string list.
///
/// Writes go to a sibling temp file first and are renamed into place, so a crash
/// mid-write leaves the previous document intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

type Document = BTreeMap<String, Vec<String>>;

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Document, PulseError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => {
                return Err(PulseError::Persistence(format!(
                    "read {}: {e}",
                    self.path.display()
                )));
            }
        };
        if text.trim().is_empty() {
            return Ok(Document::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            PulseError::Persistence(format!("decode {}: {e}", self.path.display()))
        })
    }

    fn write_document(&self, doc: &Document) -> Result<(), PulseError> {
        let persist = |e: std::io::Error| {
            PulseError::Persistence(format!("write {}: {e}", self.path.display()))
        };
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(persist)?;
        }
        let body = serde_json::to_string_pretty(doc)
            .map_err(|e| PulseError::Persistence(format!("encode: {e}")))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body).map_err(persist)?;
        fs::rename(&tmp, &self.path).map_err(persist)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>, PulseError> {
        Ok(self.read_document()?.remove(key))
    }

    fn set_string_list(&self, key: &str, values: &[String]) -> Result<(), PulseError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut doc = self.read_document()?;
        doc.insert(key.to_string(), values.to_vec());
        self.write_document(&doc)
    }
}
