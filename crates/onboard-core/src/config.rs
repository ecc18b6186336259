//! Configuration for Onboard.

use onboard_indexer::{ScanOptions, DEFAULT_IGNORE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::CoreError;

/// Onboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardConfig {
    /// Directory holding cached indexes
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Maximum files listed in the codebase context
    #[serde(default = "default_max_index_files")]
    pub max_index_files: usize,

    /// Character budget for the codebase context in the prompt
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,

    /// Ignore patterns applied while scanning
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    /// Include dot-prefixed paths while scanning
    #[serde(default)]
    pub include_hidden: bool,

    /// Local task table (JSON or YAML)
    #[serde(default)]
    pub tasks_file: Option<PathBuf>,

    /// Model name passed to the chat backend
    #[serde(default = "default_model")]
    pub model: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("onboard")
        .join("index")
}

fn default_max_index_files() -> usize {
    300
}

fn default_max_context_chars() -> usize {
    12_000
}

fn default_ignore_patterns() -> Vec<String> {
    DEFAULT_IGNORE.iter().map(|p| p.to_string()).collect()
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OnboardConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            max_index_files: default_max_index_files(),
            max_context_chars: default_max_context_chars(),
            ignore_patterns: default_ignore_patterns(),
            include_hidden: false,
            tasks_file: None,
            model: default_model(),
            log_level: default_log_level(),
        }
    }
}

impl OnboardConfig {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("onboard")
            .join("config.yaml")
    }

    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Self {
        let config_path = Self::default_path();

        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_yaml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config file: {}", e);
                }
            }
        }

        Self::default()
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Scanner options derived from this configuration
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            ignore_patterns: self.ignore_patterns.clone(),
            include_hidden: self.include_hidden,
            ..Default::default()
        }
    }
}
