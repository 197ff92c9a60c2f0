//! Blob persistence collaborator for the page store.
//!
//! The store persists as a single serialized JSON blob under one well-known
//! location. This module owns only the blob mechanics (read, write, remove)
//! so the store's semantics stay independent of where the bytes live.
//! `FsStorage` keeps the blob in a file; `MemoryStorage` keeps it in memory
//! (tests, and the degraded mode the store falls into when writes fail).

use std::fs;
use std::io;
use std::path::PathBuf;

/// Read/write/remove a single opaque blob.
pub trait Storage {
    /// The current blob, or `None` if nothing has been persisted.
    fn read(&self) -> io::Result<Option<String>>;
    /// Replace the persisted blob.
    fn write(&mut self, blob: &str) -> io::Result<()>;
    /// Remove the persisted blob. Removing an absent blob is not an error.
    fn remove(&mut self) -> io::Result<()>;
}

/// Filesystem-backed storage: the blob is a file at a fixed path.
#[derive(Debug, Clone)]
pub struct FsStorage {
    path: PathBuf,
}

impl FsStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for FsStorage {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, blob: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, blob)
    }

    fn remove(&mut self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory storage. Used by tests and available as an ephemeral backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blob: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the storage with an existing blob (simulates a prior session).
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> io::Result<()> {
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn remove(&mut self) -> io::Result<()> {
        self.blob = None;
        Ok(())
    }
}
