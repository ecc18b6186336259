//! Architectural role hints from file paths.
//!
//! Classification is a first-match-wins walk over [`ROLE_RULES`]. The table
//! order is part of the behavior: a filename carrying keywords of two roles
//! resolves to whichever role is listed first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heuristic role of a file within its project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Config,
    Entrypoint,
    ApiHandler,
    Component,
    Service,
    Model,
    Middleware,
    Test,
    Util,
    #[default]
    Generic,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Config => "config",
            Role::Entrypoint => "entrypoint",
            Role::ApiHandler => "api_handler",
            Role::Component => "component",
            Role::Service => "service",
            Role::Model => "model",
            Role::Middleware => "middleware",
            Role::Test => "test",
            Role::Util => "util",
            Role::Generic => "generic",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered role keyword table.
pub const ROLE_RULES: &[(Role, &[&str])] = &[
    (
        Role::Config,
        &[
            "config",
            "settings",
            ".env",
            "constants",
            "requirements",
            "package.json",
            "pyproject",
        ],
    ),
    (
        Role::Entrypoint,
        &["main", "app", "index", "__main__", "run", "cli", "server"],
    ),
    (
        Role::ApiHandler,
        &["api", "route", "endpoint", "controller", "handler"],
    ),
    (
        Role::Component,
        &["component", "widget", "ui", "view", "page", "task_guide", "guide"],
    ),
    (
        Role::Service,
        &[
            "service", "client", "provider", "manager", "reader", "builder", "scanner", "pipeline",
        ],
    ),
    (Role::Model, &["model", "schema", "entity", "type"]),
    (Role::Middleware, &["middleware", "interceptor"]),
    (Role::Test, &["test", "spec", "__tests__"]),
    (Role::Util, &["util", "helper", "lib", "utils"]),
];

/// Filenames that mark an entry point when no keyword matched.
const ENTRYPOINT_FILES: &[&str] = &["main.py", "app.py", "server.py", "index.js"];

/// Detect the role of a file from its slash-separated relative path.
///
/// The filename is tested against every role first; only when no role
/// matches the filename are the parent directory segments consulted.
pub fn detect_role(rel_path: &str) -> Role {
    let lower = rel_path.to_lowercase();
    let mut segments: Vec<&str> = lower.split('/').collect();
    let filename = segments.pop().unwrap_or("");

    let hit = |text: &str, keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    if let Some((role, _)) = ROLE_RULES.iter().find(|(_, kws)| hit(filename, kws)) {
        return *role;
    }

    if let Some((role, _)) = ROLE_RULES
        .iter()
        .find(|(_, kws)| segments.iter().any(|seg| hit(seg, kws)))
    {
        return *role;
    }

    if ENTRYPOINT_FILES.contains(&filename) {
        return Role::Entrypoint;
    }

    Role::Generic
}
