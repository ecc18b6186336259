//! Language detection for source files.

use serde::{Deserialize, Serialize};

/// Languages recognized from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Vue,
    Html,
    Css,
    Scss,
    Json,
    Yaml,
    Markdown,
    Rust,
    Go,
    Toml,
}

impl Language {
    /// The lowercase tag used in file records and the context block.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Vue => "vue",
            Language::Html => "html",
            Language::Css => "css",
            Language::Scss => "scss",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Markdown => "markdown",
            Language::Rust => "rust",
            Language::Go => "go",
            Language::Toml => "toml",
        }
    }
}

/// Detect the language from a lowercased extension with its leading dot.
pub fn detect_language(ext: &str) -> Option<Language> {
    match ext {
        ".py" => Some(Language::Python),
        ".js" | ".jsx" => Some(Language::JavaScript),
        ".ts" | ".tsx" => Some(Language::TypeScript),
        ".vue" => Some(Language::Vue),
        ".html" => Some(Language::Html),
        ".css" => Some(Language::Css),
        ".scss" => Some(Language::Scss),
        ".json" => Some(Language::Json),
        ".yaml" | ".yml" => Some(Language::Yaml),
        ".md" => Some(Language::Markdown),
        ".rs" => Some(Language::Rust),
        ".go" => Some(Language::Go),
        ".toml" => Some(Language::Toml),
        _ => None,
    }
}

/// Language hint string for an extension; empty when unrecognized.
pub fn language_hint(ext: &str) -> &'static str {
    detect_language(ext).map(|l| l.as_str()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_web_languages() {
        assert_eq!(detect_language(".ts"), Some(Language::TypeScript));
        assert_eq!(detect_language(".tsx"), Some(Language::TypeScript));
        assert_eq!(detect_language(".jsx"), Some(Language::JavaScript));
        assert_eq!(detect_language(".vue"), Some(Language::Vue));
        assert_eq!(detect_language(".scss"), Some(Language::Scss));
    }

    #[test]
    fn test_detect_config_files() {
        assert_eq!(detect_language(".yml"), Some(Language::Yaml));
        assert_eq!(detect_language(".yaml"), Some(Language::Yaml));
        assert_eq!(detect_language(".toml"), Some(Language::Toml));
    }

    #[test]
    fn test_unknown_yields_empty_hint() {
        assert_eq!(language_hint(".xyz"), "");
        assert_eq!(language_hint(""), "");
        assert_eq!(language_hint(".py"), "python");
    }

    #[test]
    fn test_serialized_tag_matches_hint() {
        let json = serde_json::to_string(&Language::JavaScript).unwrap();
        assert_eq!(json, "\"javascript\"");
    }
}
