//! Rendering a structured index into an LLM context block.
//!
//! The section framing is fixed: downstream prompt parsing expects the
//! tree, then the file list, then the by-extension retrieval hints.
//!
//! The formatter bounds the number of listed files only. Callers that hand
//! the text to a model with a bounded context window must also cap it by
//! characters, marking the cut with `(truncated)`, before submitting it.

use crate::index::StructuredIndex;
use crate::scanner::Role;

/// Default number of files listed.
pub const DEFAULT_MAX_FILES: usize = 500;

/// Sample paths shown per extension bucket.
const EXTENSION_SAMPLE: usize = 10;

/// Symbol names shown per file.
const SYMBOL_SAMPLE: usize = 5;

/// Renders [`StructuredIndex`] values as markdown text for a prompt.
#[derive(Debug, Clone)]
pub struct ContextFormatter {
    max_files: usize,
}

impl ContextFormatter {
    /// Create a formatter with the default file cap.
    pub fn new() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
        }
    }

    /// Create a formatter listing at most `max_files` files.
    pub fn with_max_files(max_files: usize) -> Self {
        Self { max_files }
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// Render the index.
    pub fn format(&self, index: &StructuredIndex) -> String {
        let mut lines: Vec<String> = vec![
            "# Codebase structure".into(),
            String::new(),
            "## File tree".into(),
            "```".into(),
            index.file_tree.clone(),
            "```".into(),
            String::new(),
            format!("## File list (total: {} files)", index.total_files),
            String::new(),
        ];

        let shown = if index.files.len() > self.max_files {
            lines.push(format!(
                "(Showing first {} files; total {})",
                self.max_files, index.total_files
            ));
            lines.push(String::new());
            &index.files[..self.max_files]
        } else {
            &index.files[..]
        };

        for file in shown {
            let kind = if file.language.is_empty() {
                &file.ext
            } else {
                &file.language
            };
            let line_info = match file.lines {
                Some(n) if n > 0 => format!(" ({} lines)", n),
                _ => String::new(),
            };

            let mut meta = Vec::new();
            if file.role != Role::Generic {
                meta.push(format!("role:{}", file.role));
            }
            if !file.framework.is_empty() {
                meta.push(format!("framework:{}", file.framework));
            }
            if !file.symbols.is_empty() {
                let mut exports = file
                    .symbols
                    .iter()
                    .take(SYMBOL_SAMPLE)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                if file.symbols.len() > SYMBOL_SAMPLE {
                    exports.push_str("...");
                }
                meta.push(format!("exports:{}", exports));
            }
            let meta_str = if meta.is_empty() {
                String::new()
            } else {
                format!(" [{}]", meta.join(", "))
            };

            lines.push(format!("- {} [{}]{}{}", file.path, kind, line_info, meta_str));
        }

        lines.push(String::new());
        lines.push("## By extension (for retrieval)".into());
        for (ext, paths) in &index.by_extension {
            let mut sample = paths
                .iter()
                .take(EXTENSION_SAMPLE)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if paths.len() > EXTENSION_SAMPLE {
                sample.push_str(&format!(" ... (+{} more)", paths.len() - EXTENSION_SAMPLE));
            }
            lines.push(format!("- {}: {}", ext, sample));
        }

        lines.join("\n")
    }
}

impl Default for ContextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format `index` listing at most `max_files` files.
pub fn format_index_for_llm(index: &StructuredIndex, max_files: usize) -> String {
    ContextFormatter::with_max_files(max_files).format(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{build_index, IndexedFile, EMPTY_TREE};
    use crate::scanner::FileRecord;
    use std::path::PathBuf;

    fn record(rel: &str) -> FileRecord {
        FileRecord {
            path: PathBuf::from("/p").join(rel),
            relative_path: rel.to_string(),
            extension: ".py".to_string(),
            size_bytes: 1,
            line_count: Some(1),
            language_hint: "python".to_string(),
            top_level_symbols: vec![],
            role_hint: Role::Generic,
            framework_hint: String::new(),
        }
    }

    fn file_lines(text: &str) -> Vec<&str> {
        text.lines().filter(|l| l.starts_with("- ") && l.contains(" [")).collect()
    }

    #[test]
    fn test_sections_in_order() {
        let index = build_index(&[record("a.py")]);
        let text = format_index_for_llm(&index, 10);

        let tree = text.find("## File tree").unwrap();
        let list = text.find("## File list (total: 1 files)").unwrap();
        let by_ext = text.find("## By extension (for retrieval)").unwrap();
        assert!(text.starts_with("# Codebase structure"));
        assert!(tree < list && list < by_ext);
        assert!(text.contains("```\n└── a.py\n```"));
    }

    #[test]
    fn test_empty_index_placeholder() {
        let index = build_index(&[]);
        let text = format_index_for_llm(&index, 10);
        assert!(text.contains(EMPTY_TREE));
        assert!(text.contains("(total: 0 files)"));
    }

    #[test]
    fn test_plain_file_line() {
        let index = build_index(&[record("a.py")]);
        let text = format_index_for_llm(&index, 10);
        assert!(text.contains("\n- a.py [python] (1 lines)\n"));
    }

    #[test]
    fn test_metadata_suffix() {
        let file = IndexedFile {
            path: "src/api/users.ts".into(),
            ext: ".ts".into(),
            lines: None,
            language: "typescript".into(),
            role: Role::ApiHandler,
            framework: "express".into(),
            symbols: (1..=7).map(|i| format!("s{}", i)).collect(),
        };
        let index = StructuredIndex {
            file_tree: "└── users.ts".into(),
            files: vec![file],
            by_extension: Default::default(),
            total_files: 1,
        };
        let text = format_index_for_llm(&index, 10);
        assert!(text.contains(
            "- src/api/users.ts [typescript] [role:api_handler, framework:express, exports:s1, s2, s3, s4, s5...]"
        ));
    }

    #[test]
    fn test_extension_fallback_and_zero_lines() {
        let file = IndexedFile {
            path: "notes.log".into(),
            ext: ".log".into(),
            lines: Some(0),
            language: String::new(),
            role: Role::Generic,
            framework: String::new(),
            symbols: vec![],
        };
        let index = StructuredIndex {
            file_tree: "└── notes.log".into(),
            files: vec![file],
            by_extension: Default::default(),
            total_files: 1,
        };
        let text = format_index_for_llm(&index, 10);
        assert!(text.contains("\n- notes.log [.log]\n"));
    }

    #[test]
    fn test_truncation_note() {
        let records: Vec<_> = (0..600).map(|i| record(&format!("f{:04}.py", i))).collect();
        let index = build_index(&records);
        let text = format_index_for_llm(&index, 300);

        assert!(text.contains("## File list (total: 600 files)"));
        assert!(text.contains("(Showing first 300 files; total 600)"));
        let listed = file_lines(&text);
        assert_eq!(listed.len(), 300);
        assert!(listed[0].starts_with("- f0000.py"));
        assert!(listed[299].starts_with("- f0299.py"));
    }

    #[test]
    fn test_no_truncation_lists_every_file_in_order() {
        let records: Vec<_> = ["a.py", "b/c.py", "d.py"].iter().map(|p| record(p)).collect();
        let index = build_index(&records);
        let text = format_index_for_llm(&index, 3);

        assert!(!text.contains("Showing first"));
        let listed: Vec<_> = file_lines(&text)
            .iter()
            .map(|l| l.split(' ').nth(1).unwrap())
            .collect();
        assert_eq!(listed, vec!["a.py", "b/c.py", "d.py"]);
    }

    #[test]
    fn test_extension_samples_are_capped() {
        let records: Vec<_> = (0..13).map(|i| record(&format!("m{:02}.py", i))).collect();
        let index = build_index(&records);
        let text = format_index_for_llm(&index, 100);

        let line = text.lines().find(|l| l.starts_with("- .py: ")).unwrap();
        assert!(line.contains("m09.py"));
        assert!(!line.contains("m10.py"));
        assert!(line.ends_with(" ... (+3 more)"));
    }
}
