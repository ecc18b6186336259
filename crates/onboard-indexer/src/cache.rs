//! On-disk index cache keyed by project root.
//!
//! One JSON file per root, named by a hash of the resolved root path. An
//! entry is stale when the root directory's modification time is newer
//! than the cache file. Only the root's own mtime is consulted, so edits
//! deep in the tree that leave the root entry untouched are not detected.
//!
//! The cache is an optimization: every failure reads as a miss and every
//! write failure is dropped.

use crate::format::format_index_for_llm;
use crate::index::StructuredIndex;
use crate::IndexerError;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

/// Cache of structured indexes under a single directory.
#[derive(Debug, Clone)]
pub struct IndexCache {
    dir: PathBuf,
}

impl IndexCache {
    /// Create a cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Compute the cache key for a project root.
    pub fn root_hash(root: &Path) -> String {
        let resolved = resolve(root);
        let mut hasher = Sha256::new();
        hasher.update(resolved.to_string_lossy().as_bytes());
        format!("{:x}", hasher.finalize())[..16].to_string()
    }

    /// Path of the cache file for a project root.
    pub fn entry_path(&self, root: &Path) -> PathBuf {
        self.dir.join(format!("index_{}.json", Self::root_hash(root)))
    }

    /// Load a fresh cached index, or `None` if missing, stale or unreadable.
    pub fn load(&self, root: &Path) -> Option<StructuredIndex> {
        let path = self.entry_path(root);

        let cache_mtime = match modified(&path) {
            Some(t) => t,
            None => {
                debug!(path = ?path, "Cache miss: no entry");
                return None;
            }
        };
        let Some(root_mtime) = modified(&resolve(root)) else {
            debug!(root = ?root, "Cache miss: root not readable");
            return None;
        };

        if cache_mtime < root_mtime {
            debug!(path = ?path, "Cache miss: root modified after caching");
            return None;
        }

        match read_index(&path) {
            Ok(index) => {
                let age = Utc::now().signed_duration_since(DateTime::<Utc>::from(cache_mtime));
                info!(
                    root = ?root,
                    files = index.total_files,
                    age_secs = age.num_seconds(),
                    "Cache hit"
                );
                Some(index)
            }
            Err(e) => {
                debug!(path = ?path, error = %e, "Cache miss: unreadable entry");
                None
            }
        }
    }

    /// Cached context text for `root`, formatted with `max_files`.
    pub fn get(&self, root: &Path, max_files: usize) -> Option<String> {
        self.load(root)
            .map(|index| format_index_for_llm(&index, max_files))
    }

    /// Store an index for `root`, overwriting any previous entry.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn put(&self, root: &Path, index: &StructuredIndex) {
        let path = self.entry_path(root);

        match write_index(&path, index) {
            Ok(()) => debug!(path = ?path, files = index.total_files, "Cached index"),
            Err(e) => debug!(path = ?path, error = %e, "Failed to write cache entry"),
        }
    }
}

/// Read a JSON-serialized index from `path`.
pub fn read_index(path: &Path) -> Result<StructuredIndex, IndexerError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Write `index` as pretty JSON to `path`, creating parent directories.
pub fn write_index(path: &Path, index: &StructuredIndex) -> Result<(), IndexerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_vec_pretty(index)?)?;
    Ok(())
}

fn resolve(root: &Path) -> PathBuf {
    root.canonicalize().unwrap_or_else(|_| root.to_path_buf())
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
