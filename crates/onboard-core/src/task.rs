//! Task records and the sources they are read from.

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_id: String,
    pub assignee: String,
    pub title: String,
    pub description: String,
    pub status: String,
}

/// Anything that can list task records.
pub trait TaskSource: Send + Sync {
    /// All tasks with a non-empty id, in source order.
    fn all_tasks(&self) -> Result<Vec<TaskRecord>>;

    /// First task whose id matches, ignoring case and surrounding whitespace.
    fn task_by_id(&self, task_id: &str) -> Result<Option<TaskRecord>> {
        let wanted = task_id.trim().to_lowercase();
        Ok(self
            .all_tasks()?
            .into_iter()
            .find(|t| t.task_id.to_lowercase() == wanted))
    }

    /// All tasks assigned to `assignee`, ignoring case.
    fn tasks_for_assignee(&self, assignee: &str) -> Result<Vec<TaskRecord>> {
        let wanted = assignee.trim().to_lowercase();
        Ok(self
            .all_tasks()?
            .into_iter()
            .filter(|t| t.assignee.to_lowercase() == wanted)
            .collect())
    }
}

/// Tasks held in memory.
impl TaskSource for Vec<TaskRecord> {
    fn all_tasks(&self) -> Result<Vec<TaskRecord>> {
        Ok(self.clone())
    }
}

/// Task table stored as a local JSON or YAML file.
///
/// The file holds a sequence of row maps. Column names are normalized
/// (trimmed, lowercased, spaces to underscores), so `Task ID` and
/// `task_id` name the same column. Rows without a task id are skipped.
#[derive(Debug, Clone)]
pub struct FileTaskSource {
    path: PathBuf,
}

impl FileTaskSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> Result<Vec<Map<String, Value>>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            CoreError::TaskSource(format!("{}: {}", self.path.display(), e))
        })?;

        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let parsed: std::result::Result<Vec<Map<String, Value>>, String> = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            _ => serde_json::from_str(&content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|e| CoreError::TaskSource(format!("{}: {}", self.path.display(), e)))
    }
}

impl TaskSource for FileTaskSource {
    fn all_tasks(&self) -> Result<Vec<TaskRecord>> {
        let rows = self.read_rows()?;
        let total = rows.len();

        let tasks: Vec<TaskRecord> = rows.into_iter().filter_map(row_to_task).collect();

        debug!(
            path = ?self.path,
            rows = total,
            tasks = tasks.len(),
            "Loaded task table"
        );

        Ok(tasks)
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn row_to_task(row: Map<String, Value>) -> Option<TaskRecord> {
    let row: Map<String, Value> = row
        .into_iter()
        .map(|(k, v)| (normalize_header(&k), v))
        .collect();
    let column = |name: &str| row.get(name).map(cell_text).unwrap_or_default();

    let task_id = column("task_id");
    if task_id.is_empty() {
        return None;
    }

    Some(TaskRecord {
        task_id,
        assignee: column("assignee"),
        title: column("title"),
        description: column("description"),
        status: column("status"),
    })
}
