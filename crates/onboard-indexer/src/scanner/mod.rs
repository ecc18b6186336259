//! Directory scanner module.
//!
//! Walks a project root, applies ignore rules, and derives one
//! [`FileRecord`] per included file: size, capped line count, language,
//! heuristic role, framework affinity and top-level symbols.

mod filter;
mod framework;
mod language;
mod role;
mod symbols;
mod walker;

pub use filter::{IgnoreRules, DEFAULT_IGNORE};
pub use framework::{detect_framework, DOCUMENTATION, FRAMEWORK_RULES};
pub use language::{detect_language, language_hint, Language};
pub use role::{detect_role, Role, ROLE_RULES};
pub use symbols::{extract_file_symbols, extract_symbols, MAX_SYMBOLS};
pub use walker::{count_lines, relative_path, FileEntry, Walker};

use crate::IndexerError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Default cap on lines read when counting.
pub const DEFAULT_MAX_LINE_SCAN: usize = 5000;

/// Options for scanning a project.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Ignore patterns applied to root-relative paths
    pub ignore_patterns: Vec<String>,
    /// Whether dot-prefixed path segments are included
    pub include_hidden: bool,
    /// Line count cap; files reaching it get an unknown count
    pub max_line_scan: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ignore_patterns: DEFAULT_IGNORE.iter().map(|p| p.to_string()).collect(),
            include_hidden: false,
            max_line_scan: DEFAULT_MAX_LINE_SCAN,
        }
    }
}

/// Metadata for one included file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path
    pub path: PathBuf,
    /// Root-relative path with `/` separators; unique per scan
    pub relative_path: String,
    /// Lowercased extension with leading dot, or empty
    pub extension: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// Line count, `None` when the file reached the scan cap or was unreadable
    pub line_count: Option<usize>,
    /// Language from the extension table, empty if unrecognized
    pub language_hint: String,
    /// Up to ten heuristically extracted names
    pub top_level_symbols: Vec<String>,
    /// Heuristic architectural role
    pub role_hint: Role,
    /// Heuristic framework tag, empty if none
    pub framework_hint: String,
}

/// The scanner that turns a directory into sorted file records.
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    /// Create a new scanner with default options.
    pub fn new() -> Self {
        Self {
            options: ScanOptions::default(),
        }
    }

    /// Create a scanner with custom options.
    pub fn with_options(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan a directory and return its file records sorted by relative path.
    ///
    /// Fails only when `root` is not an existing directory. Unreadable
    /// subdirectories and files degrade gracefully.
    pub fn scan(&self, root: &Path) -> Result<Vec<FileRecord>, IndexerError> {
        let start = Instant::now();

        let root = root
            .canonicalize()
            .map_err(|_| IndexerError::NotADirectory(root.to_path_buf()))?;
        if !root.is_dir() {
            return Err(IndexerError::NotADirectory(root));
        }

        info!(path = ?root, "Starting scan");

        let rules = IgnoreRules::new(&self.options.ignore_patterns, self.options.include_hidden);
        let entries = Walker::new(&root, rules).walk();

        debug!(count = entries.len(), "Files discovered");

        let records: Vec<FileRecord> = entries
            .into_iter()
            .map(|entry| self.describe(entry))
            .collect();

        info!(
            files = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Scan complete"
        );

        Ok(records)
    }

    fn describe(&self, entry: FileEntry) -> FileRecord {
        let extension = entry
            .path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .filter(|e| !e.is_empty())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();

        let line_count = count_lines(&entry.path, self.options.max_line_scan);
        let top_level_symbols = extract_file_symbols(&entry.path, &extension);

        FileRecord {
            language_hint: language_hint(&extension).to_string(),
            role_hint: detect_role(&entry.rel_path),
            framework_hint: detect_framework(&entry.rel_path).to_string(),
            path: entry.path,
            relative_path: entry.rel_path,
            extension,
            size_bytes: entry.size,
            line_count,
            top_level_symbols,
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
