use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::StoreError;

/// Durable key-value persistence for one serialized document blob.
///
/// Absence is a normal, expected state (first run), not a failure.
pub trait Store {
    fn save(&mut self, blob: &str) -> Result<(), StoreError>;
    fn load(&self) -> Result<Option<String>, StoreError>;
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn save(&mut self, blob: &str) -> Result<(), StoreError> {
        self.blob = Some(blob.to_owned());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.clone())
    }
}

/// Store backed by a single JSON file on disk.
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

impl Store for FileStore {
    fn save(&mut self, blob: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, blob)?;
        info!("saved canvas to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }
}
