//! Ignore-pattern matching on root-relative paths.

/// Default ignore patterns: dependency directories, version control,
/// build caches, minified assets and virtual environments.
pub const DEFAULT_IGNORE: &[&str] = &[
    "node_modules",
    ".git",
    "__pycache__",
    "*.pyc",
    ".venv",
    "venv",
    "env",
    ".env",
    "dist",
    "build",
    "*.egg-info",
    ".next",
    ".nuxt",
    "coverage",
    ".pytest_cache",
    ".mypy_cache",
    "*.min.js",
    "*.min.css",
];

/// Decides which root-relative paths are excluded from a scan.
///
/// Paths are expected slash-normalized (`src/app/main.py`).
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    patterns: Vec<String>,
    include_hidden: bool,
}

impl IgnoreRules {
    /// Create rules from a pattern list. Blank patterns are dropped.
    pub fn new<S: AsRef<str>>(patterns: &[S], include_hidden: bool) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| p.as_ref().trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            include_hidden,
        }
    }

    /// Rules built from [`DEFAULT_IGNORE`].
    pub fn defaults(include_hidden: bool) -> Self {
        Self::new(DEFAULT_IGNORE, include_hidden)
    }

    /// Whether a file at `rel_path` is excluded.
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        if self.is_hidden(rel_path) {
            return true;
        }
        self.patterns
            .iter()
            .any(|pattern| pattern_matches(pattern, rel_path))
    }

    /// Whether everything below the directory `rel_dir` is excluded.
    ///
    /// Suffix patterns (`*.ext`) are tested against file paths only, so
    /// they never prune a directory. Every other rule is inherited by all
    /// descendants of a matching directory.
    pub fn prunes_dir(&self, rel_dir: &str) -> bool {
        if self.is_hidden(rel_dir) {
            return true;
        }
        self.patterns
            .iter()
            .filter(|p| !p.starts_with("*."))
            .any(|pattern| pattern_matches(pattern, rel_dir))
    }

    fn is_hidden(&self, rel_path: &str) -> bool {
        !self.include_hidden && rel_path.split('/').any(|seg| seg.starts_with('.'))
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::defaults(false)
    }
}

fn pattern_matches(pattern: &str, rel_path: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix('*') {
        if suffix.starts_with('.') && rel_path.ends_with(suffix) {
            return true;
        }
    }
    rel_path.split('/').any(|seg| seg == pattern)
        || rel_path
            .strip_prefix(pattern)
            .is_some_and(|rest| rest.starts_with('/'))
        || rel_path == pattern
}
