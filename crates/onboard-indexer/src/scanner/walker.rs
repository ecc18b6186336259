//! File system walker driven by our own ignore rules.

use super::filter::IgnoreRules;
use ignore::WalkBuilder;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A discovered file entry.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Root-relative path with `/` separators
    pub rel_path: String,
    /// File size in bytes
    pub size: u64,
}

/// Sequential walker over a root directory.
///
/// The `ignore` crate's own filters (gitignore, hidden, parents) are all
/// switched off; [`IgnoreRules`] alone decides what is skipped. Directories
/// the rules exclude are pruned before they are read.
pub struct Walker {
    root: PathBuf,
    rules: IgnoreRules,
}

impl Walker {
    /// Create a new walker for the given root directory.
    pub fn new(root: &Path, rules: IgnoreRules) -> Self {
        Self {
            root: root.to_path_buf(),
            rules,
        }
    }

    /// Walk the directory tree and return all included files.
    ///
    /// Unreadable directories and entries are skipped; whatever was
    /// collected is returned. The result is sorted by relative path.
    pub fn walk(&self) -> Vec<FileEntry> {
        let prune_root = self.root.clone();
        let prune_rules = self.rules.clone();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
                if !is_dir || entry.depth() == 0 {
                    return true;
                }
                match relative_path(&prune_root, entry.path()) {
                    Some(rel) => !prune_rules.prunes_dir(&rel),
                    None => {
                        debug!(path = ?entry.path(), "Skipping non-UTF-8 directory");
                        false
                    }
                }
            })
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "Walk error");
                    continue;
                }
            };

            if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                continue;
            }

            let Some(rel_path) = relative_path(&self.root, entry.path()) else {
                debug!(path = ?entry.path(), "Skipping non-UTF-8 path");
                continue;
            };
            if self.rules.is_ignored(&rel_path) {
                continue;
            }

            match entry.metadata() {
                Ok(metadata) => entries.push(FileEntry {
                    path: entry.path().to_path_buf(),
                    rel_path,
                    size: metadata.len(),
                }),
                Err(e) => debug!(path = ?entry.path(), error = %e, "Failed to stat file"),
            }
        }

        entries.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        entries
    }
}

/// Root-relative, slash-normalized form of `path`.
///
/// `None` for the root itself and for paths that are not valid UTF-8, so
/// distinct file names never collapse onto the same key.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts = rel
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Count newline-terminated records, stopping at `cap`.
///
/// Returns `None` when the cap is reached before end of file or the file
/// cannot be read, so a returned count is never an undercount.
pub fn count_lines(path: &Path, cap: usize) -> Option<usize> {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!(path = ?path, error = %e, "Failed to open file for line count");
            return None;
        }
    };

    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut count = 0;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return Some(count),
            Ok(_) => {
                count += 1;
                if count >= cap {
                    return None;
                }
            }
            Err(e) => {
                debug!(path = ?path, error = %e, "Failed to read file for line count");
                return None;
            }
        }
    }
}
