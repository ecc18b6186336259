//! Integration tests for the Onboard pipeline: task file, index, prompt, guide.

use async_trait::async_trait;
use onboard_core::{
    ChatMessage, ChatModel, CoreError, FileTaskSource, OnboardConfig, Pipeline, Result,
};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

struct ScriptedModel;

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let user = &messages[1].content;
        assert!(user.contains("**Title:** Add discount codes"));
        assert!(user.contains("src/cart/pricing.ts"));

        Ok("**FILES TO TOUCH (in order):**
1. config/settings.yaml
2. src/cart/pricing.ts

**STEP-BY-STEP GUIDE:**
1. Add a discount table to settings.
2. Apply it in the pricing helper."
            .to_string())
    }
}

fn create_project(base: &Path) -> PathBuf {
    let project = base.join("shop");
    std::fs::create_dir_all(project.join("src/cart")).unwrap();
    std::fs::create_dir_all(project.join("config")).unwrap();
    std::fs::create_dir_all(project.join("node_modules/lodash")).unwrap();

    std::fs::write(
        project.join("src/cart/pricing.ts"),
        "export function total(items) {\n  return 0;\n}\n",
    )
    .unwrap();
    std::fs::write(project.join("config/settings.yaml"), "currency: EUR\n").unwrap();
    std::fs::write(project.join("node_modules/lodash/index.js"), "").unwrap();

    project
}

fn write_tasks(base: &Path) -> PathBuf {
    let path = base.join("tasks.json");
    std::fs::write(
        &path,
        r#"[
            {"Task ID": "SHOP-7", "Assignee": "Lin", "Title": "Add discount codes",
             "Description": "Support percentage discounts at checkout", "Status": "open"},
            {"Task ID": "SHOP-8", "Assignee": "Lin", "Title": "Fix rounding"}
        ]"#,
    )
    .unwrap();
    path
}

fn pipeline(base: &Path) -> Pipeline {
    let config = OnboardConfig {
        cache_dir: base.join("cache"),
        ..Default::default()
    };
    Pipeline::new(config, Box::new(FileTaskSource::new(write_tasks(base))))
}

#[tokio::test]
async fn test_run_end_to_end() {
    let temp_dir = tempdir().unwrap();
    let project = create_project(temp_dir.path());
    let pipeline = pipeline(temp_dir.path());

    let result = pipeline
        .run("shop-7", &project, &ScriptedModel, true)
        .await
        .unwrap();

    assert_eq!(result.task.task_id, "SHOP-7");
    assert_eq!(
        result.guide.files_ordered,
        vec!["config/settings.yaml", "src/cart/pricing.ts"]
    );
    assert!(result.guide.steps_text.ends_with("pricing helper."));
}

#[tokio::test]
async fn test_prepare_context_excludes_ignored_dirs() {
    let temp_dir = tempdir().unwrap();
    let project = create_project(temp_dir.path());
    let pipeline = pipeline(temp_dir.path());

    let request = pipeline.prepare("SHOP-8", &project, false).await.unwrap();

    assert!(request.context.contains("## File list (total: 2 files)"));
    assert!(!request.context.contains("node_modules"));
    assert!(request.messages[1]
        .content
        .contains("**Description:** (no description)"));
}

#[tokio::test]
async fn test_cached_context_matches_fresh() {
    let temp_dir = tempdir().unwrap();
    let project = create_project(temp_dir.path());
    let pipeline = pipeline(temp_dir.path());

    let fresh = pipeline.codebase_context(&project, false).await.unwrap();
    let cached = pipeline.codebase_context(&project, true).await.unwrap();

    assert_eq!(fresh, cached);
}

#[tokio::test]
async fn test_missing_task_and_root() {
    let temp_dir = tempdir().unwrap();
    let project = create_project(temp_dir.path());
    let pipeline = pipeline(temp_dir.path());

    let err = pipeline.prepare("SHOP-99", &project, false).await.unwrap_err();
    assert!(matches!(err, CoreError::TaskNotFound(_)));

    let err = pipeline
        .prepare("SHOP-7", &temp_dir.path().join("nope"), false)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidRoot(_)));
}
