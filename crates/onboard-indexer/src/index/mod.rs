//! Structured index built from scan results.
//!
//! The [`StructuredIndex`] is the single interchange type shared by the
//! formatter and the cache. It serializes to plain JSON maps and arrays.

mod tree;

pub use tree::{FileTree, EMPTY_TREE};

use crate::scanner::{FileRecord, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Bucket name for files without an extension.
pub const NO_EXTENSION: &str = "(no ext)";

/// Per-file metadata as carried by the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedFile {
    pub path: String,
    pub ext: String,
    pub lines: Option<usize>,
    pub language: String,
    pub role: Role,
    pub framework: String,
    pub symbols: Vec<String>,
}

impl From<&FileRecord> for IndexedFile {
    fn from(record: &FileRecord) -> Self {
        Self {
            path: record.relative_path.clone(),
            ext: record.extension.clone(),
            lines: record.line_count,
            language: record.language_hint.clone(),
            role: record.role_hint,
            framework: record.framework_hint.clone(),
            symbols: record.top_level_symbols.clone(),
        }
    }
}

/// Tree text, file list and extension grouping for one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredIndex {
    /// Pre-rendered ASCII file tree
    pub file_tree: String,
    /// File metadata in scan order
    pub files: Vec<IndexedFile>,
    /// Extension (or [`NO_EXTENSION`]) to relative paths, in scan order
    pub by_extension: BTreeMap<String, Vec<String>>,
    /// Number of files in the scan
    pub total_files: usize,
}

impl StructuredIndex {
    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }
}

/// Build the structured index from scanner output. Pure and infallible.
pub fn build_index(records: &[FileRecord]) -> StructuredIndex {
    let file_tree = FileTree::from_paths(records.iter().map(|r| r.relative_path.as_str()));

    let mut by_extension: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut files = Vec::with_capacity(records.len());

    for record in records {
        files.push(IndexedFile::from(record));

        let key = if record.extension.is_empty() {
            NO_EXTENSION
        } else {
            record.extension.as_str()
        };
        by_extension
            .entry(key.to_string())
            .or_default()
            .push(record.relative_path.clone());
    }

    debug!(
        files = files.len(),
        extensions = by_extension.len(),
        "Index built"
    );

    StructuredIndex {
        file_tree: file_tree.render(),
        files,
        by_extension,
        total_files: records.len(),
    }
}
