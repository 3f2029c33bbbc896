//! Best-effort JSON file cache keyed by file name.
//!
//! Read failures look like misses and write failures are only logged. Writes
//! land in a temp file that is renamed over the target, so a concurrent
//! reader sees either the old entry or the new one.

use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct FileCache {
    dir: Option<PathBuf>,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: Some(dir.into()) }
    }

    /// A cache that never hits and never writes.
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.dir.as_ref()?.join(key);
        let contents = fs::read_to_string(&path).ok()?;

        match serde_json::from_str(&contents) {
            Ok(value) => {
                tracing::debug!(key, "cache hit");
                Some(value)
            }
            Err(e) => {
                tracing::debug!(key, error = %e, "ignoring unreadable cache entry");
                None
            }
        }
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let Some(dir) = &self.dir else {
            return;
        };
        if let Err(e) = write_atomic(dir, key, value) {
            tracing::warn!(key, error = %e, "failed to write cache entry");
        }
    }
}

fn write_atomic<T: Serialize>(dir: &Path, key: &str, value: &T) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;

    let json = serde_json::to_vec(value)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&json)?;
    tmp.persist(dir.join(key)).map_err(|e| e.error)?;
    Ok(())
}
