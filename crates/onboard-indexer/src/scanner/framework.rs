//! Framework and tech-stack hints from file paths.

/// Hint reserved for documentation files regardless of path keywords.
pub const DOCUMENTATION: &str = "documentation";

/// Extensions treated as documentation.
const DOC_EXTENSIONS: &[&str] = &[".md", ".txt"];

/// Ordered framework indicator table. First matching indicator wins.
pub const FRAMEWORK_RULES: &[(&str, &[&str])] = &[
    ("crewai", &["crew", "crewai", "ollama", "agent"]),
    ("gspread", &["sheet", "google", "spreadsheet", "gspread", "reader"]),
    ("langchain", &["langchain", "llm", "embedding"]),
    ("react", &["components", "pages", "hooks", "/component", "/page"]),
    ("vue", &["vue", "/views"]),
    ("nextjs", &["next.config", "/app"]),
    ("express", &["routes", "express"]),
    ("fastapi", &["fastapi"]),
    ("django", &["settings.py", "models.py", "views.py", "urls.py", "manage.py"]),
    ("flask", &["flask"]),
];

/// Detect a framework hint from a slash-separated relative path.
///
/// Returns an empty string when nothing matches.
pub fn detect_framework(rel_path: &str) -> &'static str {
    let lower = rel_path.to_lowercase();

    if DOC_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return DOCUMENTATION;
    }

    FRAMEWORK_RULES
        .iter()
        .find(|(_, indicators)| indicators.iter().any(|i| lower.contains(i)))
        .map(|(name, _)| *name)
        .unwrap_or("")
}
