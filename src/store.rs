//! Derived-artifact persistence.
//!
//! Artifacts are write-once: [`ArtifactStore::write_if_absent`] stores the
//! content only if nothing is stored under that name yet, and reports which
//! of the two happened. An existing artifact is never overwritten.
//!
//! Two stores are provided:
//! - [`DirectoryStore`]: one `<name>.txt` file per artifact in a directory
//! - [`MemoryStore`]: a map, for embedding and tests

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};
use thiserror::Error;

/// Errors that can occur while persisting an artifact.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write artifact '{name}': {source}")]
    IoError {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid artifact name '{0}'")]
    InvalidName(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// What a write request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The artifact did not exist and has been stored
    Written,
    /// An artifact with this name already existed and was left untouched
    AlreadyExists,
}

impl WriteOutcome {
    pub fn is_written(self) -> bool {
        self == WriteOutcome::Written
    }
}

impl std::fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteOutcome::Written => write!(f, "written successfully"),
            WriteOutcome::AlreadyExists => write!(f, "already exists"),
        }
    }
}

/// Check-then-write storage for derived artifacts.
pub trait ArtifactStore {
    /// Stores `content` under `name` unless an artifact with that name
    /// exists.
    fn write_if_absent(&self, name: &str, content: &str) -> StoreResult<WriteOutcome>;

    /// Returns true if an artifact with this name exists.
    fn contains(&self, name: &str) -> StoreResult<bool>;
}

fn validate_name(name: &str) -> StoreResult<()> {
    let bad = name.is_empty()
        || name.contains(['/', '\\', '\0'])
        || name.starts_with('.');
    if bad {
        Err(StoreError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Stores each artifact as `<dir>/<name>.txt`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    /// Creates a store rooted at `dir`. The directory is created on the
    /// first write if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an artifact is stored at.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", name))
    }

    fn io_error(name: &str, source: io::Error) -> StoreError {
        StoreError::IoError {
            name: name.to_string(),
            source,
        }
    }
}

impl ArtifactStore for DirectoryStore {
    fn write_if_absent(&self, name: &str, content: &str) -> StoreResult<WriteOutcome> {
        validate_name(name)?;
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(name, e))?;

        let path = self.path_for(name);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                warn!("{} already exists, not overwriting", path.display());
                return Ok(WriteOutcome::AlreadyExists);
            }
            Err(e) => return Err(Self::io_error(name, e)),
        };

        if let Err(e) = file.write_all(content.as_bytes()).and_then(|_| file.sync_all()) {
            drop(file);
            // No partial artifact may stay behind
            let _ = fs::remove_file(&path);
            return Err(Self::io_error(name, e));
        }

        debug!("wrote {} ({} bytes)", path.display(), content.len());
        Ok(WriteOutcome::Written)
    }

    fn contains(&self, name: &str) -> StoreResult<bool> {
        validate_name(name)?;
        Ok(self.path_for(name).exists())
    }
}

/// Keeps artifacts in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    artifacts: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of a stored artifact.
    pub fn get(&self, name: &str) -> Option<String> {
        self.lock().get(name).cloned()
    }

    /// Number of stored artifacts.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.artifacts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ArtifactStore for MemoryStore {
    fn write_if_absent(&self, name: &str, content: &str) -> StoreResult<WriteOutcome> {
        validate_name(name)?;
        let mut artifacts = self.lock();
        if artifacts.contains_key(name) {
            warn!("artifact '{}' already exists, not overwriting", name);
            return Ok(WriteOutcome::AlreadyExists);
        }
        artifacts.insert(name.to_string(), content.to_string());
        Ok(WriteOutcome::Written)
    }

    fn contains(&self, name: &str) -> StoreResult<bool> {
        validate_name(name)?;
        Ok(self.lock().contains_key(name))
    }
}
