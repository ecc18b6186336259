//! Heuristic top-level symbol extraction.
//!
//! This is a line-oriented regex scan, not a parser. Each line is trimmed
//! and tested against a small per-language set of declaration shapes.
//! Multi-line signatures, decorators-only lines, macros and unusual
//! formatting are missed, and nested declarations that start a line (such
//! as Python methods) are picked up. Treat the output as a hint.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

/// Maximum number of symbols kept per file.
pub const MAX_SYMBOLS: usize = 10;

static PYTHON_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| compile(&[r"^(?:async\s+)?(?:def|class)\s+(\w+)"]));

static SCRIPT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"^(?:export\s+)?function\s+(\w+)",
        r"^(?:export\s+)?class\s+(\w+)",
        r"^(?:export\s+)?const\s+(\w+)\s*=",
        r"^(?:export\s+)?let\s+(\w+)\s*=",
    ])
});

static RUST_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"^(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?(?:unsafe\s+)?fn\s+(\w+)",
        r"^(?:pub(?:\([^)]*\))?\s+)?(?:struct|enum|trait|mod)\s+(\w+)",
    ])
});

static GO_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| compile(&[r"^func\s+(?:\([^)]*\)\s*)?(\w+)", r"^type\s+(\w+)"]));

/// An invalid pattern is logged and dropped, so it never matches.
fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(pattern = %p, error = %e, "Invalid symbol pattern");
                None
            }
        })
        .collect()
}

fn patterns_for(ext: &str) -> Option<&'static [Regex]> {
    let patterns: &'static Lazy<Vec<Regex>> = match ext {
        ".py" => &PYTHON_PATTERNS,
        ".js" | ".jsx" | ".ts" | ".tsx" => &SCRIPT_PATTERNS,
        ".rs" => &RUST_PATTERNS,
        ".go" => &GO_PATTERNS,
        _ => return None,
    };
    Some(patterns.as_slice())
}

/// Whether symbols are extracted for this extension at all.
pub fn supports_extension(ext: &str) -> bool {
    patterns_for(ext).is_some()
}

/// Extract up to [`MAX_SYMBOLS`] top-level names from source text.
pub fn extract_symbols(content: &str, ext: &str) -> Vec<String> {
    let Some(patterns) = patterns_for(ext) else {
        return Vec::new();
    };

    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            patterns
                .iter()
                .find_map(|re| re.captures(line))
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .take(MAX_SYMBOLS)
        .collect()
}

/// Read a file and extract its symbols. Any read failure yields no symbols.
pub fn extract_file_symbols(path: &Path, ext: &str) -> Vec<String> {
    if !supports_extension(ext) {
        return Vec::new();
    }
    match std::fs::read(path) {
        Ok(bytes) => extract_symbols(&String::from_utf8_lossy(&bytes), ext),
        Err(e) => {
            debug!(path = ?path, error = %e, "Failed to read file for symbols");
            Vec::new()
        }
    }
}
