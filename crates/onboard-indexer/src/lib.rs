//! Onboard Indexer
//!
//! This crate provides the codebase indexing engine for Onboard, including:
//! - Directory scanning with ignore patterns and per-file heuristics
//!   (language, role, framework, top-level symbols)
//! - Structured index building with an ASCII file tree
//! - Bounded LLM context formatting
//! - An on-disk index cache keyed by project root
//!
//! Role, framework and symbol fields are best-effort hints, not
//! guaranteed classifications.

pub mod cache;
mod error;
pub mod format;
pub mod index;
pub mod scanner;

pub use cache::{read_index, write_index, IndexCache};
pub use error::IndexerError;
pub use format::{format_index_for_llm, ContextFormatter, DEFAULT_MAX_FILES};
pub use index::{build_index, FileTree, IndexedFile, StructuredIndex, NO_EXTENSION};
pub use scanner::{FileRecord, IgnoreRules, Language, Role, ScanOptions, Scanner, DEFAULT_IGNORE};
