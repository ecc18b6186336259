//! Task guide prompts and response parsing.
//!
//! Builds the system and user messages that pair a task with the codebase
//! context block, and pulls the ordered file list and step-by-step text
//! back out of a model response.

use crate::task::TaskRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Marker appended when the codebase context is cut to its budget.
pub const TRUNCATION_MARKER: &str = "\n\n... (truncated)";

pub const SYSTEM_PROMPT: &str = "You are an expert onboarding assistant for new developers. \
Given a task and a codebase structure (file tree and file list), you produce:
1. An ordered list of file paths that the developer should look at or modify to complete the task \
(from the provided codebase only; use exact paths as shown).
2. A clear step-by-step guide to complete the task.

Be concise. Prefer files that are clearly relevant (e.g. config, API clients, components mentioned \
in the task). Order files by dependency or logical workflow (e.g. config first, then API layer, then UI).";

static NUMBERED_ITEM: Lazy<Option<Regex>> = Lazy::new(|| compile(r"^\s*\d+[.)]\s+(.+)$"));

static STEPS_SECTION: Lazy<Option<Regex>> =
    Lazy::new(|| compile(r"(?is)STEP-BY-STEP GUIDE[*:]*[ \t]*\r?\n(.*)"));

/// An invalid pattern is logged and treated as never matching.
fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .map_err(|e| warn!(pattern, error = %e, "Invalid response pattern"))
        .ok()
}

/// File extensions accepted by the numbered-line fallback.
const PATH_LIKE_EXTENSIONS: &[&str] = &[".py", ".js", ".ts", ".tsx", ".jsx", ".json", ".env"];

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One message sent to a chat model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Parsed model answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGuide {
    pub raw_response: String,
    pub files_ordered: Vec<String>,
    pub steps_text: String,
}

impl TaskGuide {
    pub fn from_response(raw: impl Into<String>) -> Self {
        let raw_response = raw.into();
        Self {
            files_ordered: parse_files_section(&raw_response),
            steps_text: parse_steps_section(&raw_response),
            raw_response,
        }
    }
}

/// Cut `text` to at most `max_chars` characters, marking the cut.
///
/// The context block must go through this before it is placed in a prompt
/// for a model with a bounded context window.
pub fn truncate_context(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// User message for a task and its (already truncated) codebase context.
pub fn build_user_prompt(task: &TaskRecord, codebase_context: &str) -> String {
    let title = if task.title.is_empty() {
        "(no title)"
    } else {
        &task.title
    };
    let description = if task.description.is_empty() {
        "(no description)"
    } else {
        &task.description
    };

    format!(
        "## Task
**Title:** {title}

**Description:** {description}

## Codebase structure (reference only; suggest files from this list)
{codebase_context}

---
Respond with two sections:

**FILES TO TOUCH (in order):**
List each file path on its own line, numbered (1. path, 2. path, ...). Use only paths that appear in the codebase above.

**STEP-BY-STEP GUIDE:**
Numbered steps to complete the task. Be specific and reference the files you listed."
    )
}

/// System and user messages for a task.
pub fn build_messages(task: &TaskRecord, codebase_context: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_user_prompt(task, codebase_context)),
    ]
}

fn clean_item(item: &str) -> String {
    item.trim().trim_matches(|c| c == '`' || c == '*').trim().to_string()
}

fn numbered_item(line: &str) -> Option<String> {
    let caps = NUMBERED_ITEM.as_ref()?.captures(line)?;
    caps.get(1).map(|m| clean_item(m.as_str()))
}

fn is_steps_header(line: &str) -> bool {
    let upper = line.trim_start_matches(|c: char| c == '*' || c == '#' || c.is_whitespace());
    upper.to_uppercase().starts_with("STEP")
}

/// Numbered file paths from the `FILES TO TOUCH` section.
///
/// Without that header, any numbered line that looks like a path is taken.
pub fn parse_files_section(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let header = lines
        .iter()
        .position(|l| l.to_uppercase().contains("FILES TO TOUCH"));

    match header {
        Some(start) => lines[start + 1..]
            .iter()
            .take_while(|l| !is_steps_header(l))
            .filter_map(|l| numbered_item(l))
            .filter(|item| !item.is_empty())
            .collect(),
        None => lines
            .iter()
            .filter_map(|l| numbered_item(l))
            .filter(|item| {
                item.contains('/') || PATH_LIKE_EXTENSIONS.iter().any(|ext| item.ends_with(ext))
            })
            .collect(),
    }
}

/// Everything after the `STEP-BY-STEP GUIDE` header, trimmed.
pub fn parse_steps_section(text: &str) -> String {
    STEPS_SECTION
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = "Here is the plan.

**FILES TO TOUCH (in order):**
1. config/settings.py
2) `src/api/client.ts`
3. src/components/Login.tsx

**STEP-BY-STEP GUIDE:**
1. Add the OAuth keys to settings.
2. Call the endpoint from the client.
";

    fn task(title: &str, description: &str) -> TaskRecord {
        TaskRecord {
            task_id: "T-1".into(),
            assignee: "ada".into(),
            title: title.into(),
            description: description.into(),
            status: "open".into(),
        }
    }

    #[test]
    fn test_response_patterns_compile() {
        assert!(NUMBERED_ITEM.is_some());
        assert!(STEPS_SECTION.is_some());
    }

    #[test]
    fn test_truncate_context() {
        assert_eq!(truncate_context("short", 10), "short");
        assert_eq!(truncate_context("exactly10!", 10), "exactly10!");
        assert_eq!(
            truncate_context("0123456789abc", 10),
            format!("0123456789{}", TRUNCATION_MARKER)
        );
    }

    #[test]
    fn test_truncate_context_respects_char_boundaries() {
        let text = "├── a.py\n└── b.py";
        let cut = truncate_context(text, 3);
        assert_eq!(cut, format!("├──{}", TRUNCATION_MARKER));
    }

    #[test]
    fn test_user_prompt_placeholders() {
        let prompt = build_user_prompt(&task("", ""), "CTX");
        assert!(prompt.contains("**Title:** (no title)"));
        assert!(prompt.contains("**Description:** (no description)"));
        assert!(prompt.contains("\nCTX\n"));
    }

    #[test]
    fn test_build_messages() {
        let messages = build_messages(&task("Add login", "OAuth"), "CTX");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
        assert!(messages[1].content.contains("**Title:** Add login"));
    }

    #[test]
    fn test_parse_files_section() {
        assert_eq!(
            parse_files_section(RESPONSE),
            vec![
                "config/settings.py",
                "src/api/client.ts",
                "src/components/Login.tsx"
            ]
        );
    }

    #[test]
    fn test_parse_files_fallback_without_header() {
        let text = "1. Read the docs\n2. src/app.py\n3. package.json\n";
        assert_eq!(parse_files_section(text), vec!["src/app.py", "package.json"]);
    }

    #[test]
    fn test_parse_steps_section() {
        assert_eq!(
            parse_steps_section(RESPONSE),
            "1. Add the OAuth keys to settings.\n2. Call the endpoint from the client."
        );
        assert_eq!(parse_steps_section("no steps here"), "");
    }

    #[test]
    fn test_task_guide_from_response() {
        let guide = TaskGuide::from_response(RESPONSE);
        assert_eq!(guide.files_ordered.len(), 3);
        assert!(guide.steps_text.starts_with("1. Add the OAuth keys"));
        assert_eq!(guide.raw_response, RESPONSE);
    }
}
