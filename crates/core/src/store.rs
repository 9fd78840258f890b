//! Durable backing for the name cache.
//!
//! A store holds one opaque text blob (the serialized cache map). It is read
//! entirely and written entirely; merging is the cache's job.

use crate::error::SwatchError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Client-local persistent storage for the serialized name cache.
pub trait DurableStore: Send + Sync {
    /// Returns the stored text, or `None` if nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, SwatchError>;

    /// Replaces the stored text.
    fn write(&self, contents: &str) -> Result<(), SwatchError>;
}

impl<T: DurableStore + ?Sized> DurableStore for Arc<T> {
    fn read(&self) -> Result<Option<String>, SwatchError> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<(), SwatchError> {
        (**self).write(contents)
    }
}

/// A store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DurableStore for FileStore {
    fn read(&self) -> Result<Option<String>, SwatchError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes through a sibling temp file and renames it into place.
    fn write(&self, contents: &str) -> Result<(), SwatchError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents.as_bytes())?;
        std::fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

/// An in-process store, for tests and for running without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
        }
    }
}

impl DurableStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, SwatchError> {
        Ok(self
            .contents
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    fn write(&self, contents: &str) -> Result<(), SwatchError> {
        *self
            .contents
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("cache.json"));
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn file_store_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("cache.json");
        let store = FileStore::new(&path);
        store.write("{}").unwrap();
        assert!(path.exists());
        assert_eq!(store.read().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn file_store_write_replaces_contents_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("cache.json"));
        store.write("first").unwrap();
        store.write("second").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("second"));
        assert!(!dir.path().join("cache.json.tmp").exists());
    }

    #[test]
    fn memory_store_starts_empty() {
        assert_eq!(MemoryStore::new().read().unwrap(), None);
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::with_contents("old");
        store.write("new").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("new"));
    }
}
