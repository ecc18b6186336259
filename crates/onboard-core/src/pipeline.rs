//! Task-to-guide pipeline.
//!
//! Looks up a task, builds (or loads) the codebase context for a project
//! root, truncates it to the configured budget, and hands the resulting
//! messages to a [`ChatModel`].

use crate::guide::{build_messages, truncate_context, ChatMessage, TaskGuide};
use crate::task::{TaskRecord, TaskSource};
use crate::{CoreError, OnboardConfig, Result};
use async_trait::async_trait;
use onboard_indexer::{build_index, format_index_for_llm, IndexCache, Scanner};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Boundary to a chat-completion backend.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Everything needed to ask a model for a guide.
#[derive(Debug, Clone, Serialize)]
pub struct GuideRequest {
    pub task: TaskRecord,
    pub context: String,
    pub messages: Vec<ChatMessage>,
}

/// Task plus the parsed model answer.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub task: TaskRecord,
    pub guide: TaskGuide,
}

pub struct Pipeline {
    config: OnboardConfig,
    tasks: Box<dyn TaskSource>,
    cache: IndexCache,
}

impl Pipeline {
    pub fn new(config: OnboardConfig, tasks: Box<dyn TaskSource>) -> Self {
        let cache = IndexCache::new(config.cache_dir.clone());
        Self {
            config,
            tasks,
            cache,
        }
    }

    pub fn config(&self) -> &OnboardConfig {
        &self.config
    }

    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }

    /// LLM context block for `root`, served from the cache when allowed.
    ///
    /// A fresh index is always written back to the cache.
    pub async fn codebase_context(&self, root: &Path, use_cache: bool) -> Result<String> {
        if !root.is_dir() {
            return Err(CoreError::InvalidRoot(root.to_path_buf()));
        }

        let max_files = self.config.max_index_files;
        if use_cache {
            if let Some(text) = self.cache.get(root, max_files) {
                info!(root = ?root, "Using cached codebase index");
                return Ok(text);
            }
        }

        let options = self.config.scan_options();
        let scan_root = root.to_path_buf();
        let index = tokio::task::spawn_blocking(move || {
            Scanner::with_options(options)
                .scan(&scan_root)
                .map(|records| build_index(&records))
        })
        .await??;

        info!(root = ?root, files = index.total_files, "Indexed codebase");
        self.cache.put(root, &index);

        Ok(format_index_for_llm(&index, max_files))
    }

    /// Resolve the task and assemble the prompt messages.
    pub async fn prepare(
        &self,
        task_id: &str,
        root: &Path,
        use_cache: bool,
    ) -> Result<GuideRequest> {
        let task = self
            .tasks
            .task_by_id(task_id)?
            .ok_or_else(|| CoreError::TaskNotFound(task_id.trim().to_string()))?;

        let full = self.codebase_context(root, use_cache).await?;
        let context = truncate_context(&full, self.config.max_context_chars);
        debug!(
            task_id = %task.task_id,
            context_chars = context.chars().count(),
            truncated = context.len() != full.len(),
            "Prepared guide request"
        );

        let messages = build_messages(&task, &context);
        Ok(GuideRequest {
            task,
            context,
            messages,
        })
    }

    /// Prepare, ask the model, and parse its answer.
    pub async fn run(
        &self,
        task_id: &str,
        root: &Path,
        model: &dyn ChatModel,
        use_cache: bool,
    ) -> Result<PipelineResult> {
        let request = self.prepare(task_id, root, use_cache).await?;
        let response = model.chat(&request.messages).await?;
        let guide = TaskGuide::from_response(response);

        info!(
            task_id = %request.task.task_id,
            files = guide.files_ordered.len(),
            "Generated task guide"
        );

        Ok(PipelineResult {
            task: request.task,
            guide,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::ChatRole;
    use std::sync::Mutex;
    use tempfile::tempdir;

    struct CannedModel {
        reply: String,
        seen: Mutex<Vec<ChatMessage>>,
    }

    #[async_trait]
    impl ChatModel for CannedModel {
        async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            Ok(self.reply.clone())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        async fn chat(&self, _messages: &[ChatMessage]) -> Result<String> {
            Err(CoreError::Model("connection refused".into()))
        }
    }

    fn tasks() -> Box<dyn TaskSource> {
        Box::new(vec![TaskRecord {
            task_id: "T-1".into(),
            assignee: "ada".into(),
            title: "Add retry to client".into(),
            description: "Retry failed requests".into(),
            status: "open".into(),
        }])
    }

    fn config(cache_dir: &Path) -> OnboardConfig {
        OnboardConfig {
            cache_dir: cache_dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_codebase_context_writes_cache() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("proj");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("client.py"), "def fetch():\n    pass\n").unwrap();

        let pipeline = Pipeline::new(config(&dir.path().join("cache")), tasks());
        let text = pipeline.codebase_context(&root, true).await.unwrap();

        assert!(text.contains("- client.py [python] (2 lines)"));
        assert!(pipeline.cache().entry_path(&root).exists());
        assert_eq!(pipeline.codebase_context(&root, true).await.unwrap(), text);
    }

    #[tokio::test]
    async fn test_invalid_root() {
        let dir = tempdir().unwrap();
        let pipeline = Pipeline::new(config(dir.path()), tasks());

        let err = pipeline
            .codebase_context(&dir.path().join("missing"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidRoot(_)));
    }

    #[tokio::test]
    async fn test_prepare_truncates_context() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("proj");
        std::fs::create_dir_all(&root).unwrap();
        for i in 0..20 {
            std::fs::write(root.join(format!("module_{:02}.py", i)), "x = 1\n").unwrap();
        }

        let mut cfg = config(&dir.path().join("cache"));
        cfg.max_context_chars = 100;
        let pipeline = Pipeline::new(cfg, tasks());

        let request = pipeline.prepare("t-1", &root, false).await.unwrap();
        assert_eq!(request.task.task_id, "T-1");
        assert!(request.context.ends_with("... (truncated)"));
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, ChatRole::System);
        assert!(request.messages[1].content.contains(&request.context));
    }

    #[tokio::test]
    async fn test_prepare_unknown_task() {
        let dir = tempdir().unwrap();
        let pipeline = Pipeline::new(config(dir.path()), tasks());

        let err = pipeline.prepare("T-404", dir.path(), false).await.unwrap_err();
        assert!(matches!(err, CoreError::TaskNotFound(id) if id == "T-404"));
    }

    #[tokio::test]
    async fn test_run_parses_model_reply() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("proj");
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src/client.py"), "def fetch():\n    pass\n").unwrap();

        let model = CannedModel {
            reply: "**FILES TO TOUCH (in order):**\n1. src/client.py\n\n**STEP-BY-STEP GUIDE:**\n1. Wrap fetch in a retry loop.\n".into(),
            seen: Mutex::new(Vec::new()),
        };
        let pipeline = Pipeline::new(config(&dir.path().join("cache")), tasks());

        let result = pipeline.run("T-1", &root, &model, false).await.unwrap();

        assert_eq!(result.guide.files_ordered, vec!["src/client.py"]);
        assert_eq!(result.guide.steps_text, "1. Wrap fetch in a retry loop.");
        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[1].content.contains("src/client.py"));
    }

    #[tokio::test]
    async fn test_run_propagates_model_error() {
        let dir = tempdir().unwrap();
        let pipeline = Pipeline::new(config(&dir.path().join("cache")), tasks());

        let err = pipeline
            .run("T-1", dir.path(), &FailingModel, false)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Model(_)));
    }
}
