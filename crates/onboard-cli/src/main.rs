//! Onboard CLI
//!
//! Command-line interface for indexing a codebase, browsing the task table
//! and previewing the onboarding prompt for a task.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use onboard_core::{FileTaskSource, OnboardConfig, Pipeline, TaskRecord, TaskSource};
use onboard_indexer::{build_index, format_index_for_llm, write_index, Scanner};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "onboard")]
#[command(about = "Onboard - task-focused codebase guides for new developers")]
#[command(version)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project and build its codebase index
    Index {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Write the index JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the LLM context block to stdout
        #[arg(long)]
        llm: bool,

        /// Max files listed in the LLM context block
        #[arg(long)]
        max_files: Option<usize>,

        /// Include dot-prefixed files and directories
        #[arg(long)]
        include_hidden: bool,

        /// Extra ignore pattern (repeatable)
        #[arg(long = "ignore", value_name = "PATTERN")]
        ignore: Vec<String>,
    },

    /// List or look up tasks from a task table
    Tasks {
        /// Task table (JSON or YAML); defaults to `tasks_file` from config
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Show a single task
        #[arg(long, conflicts_with = "assignee")]
        task_id: Option<String>,

        /// Only tasks for this assignee
        #[arg(long)]
        assignee: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the prompt that would be sent to the model for a task
    Prompt {
        /// Task ID in the task table
        #[arg(short, long)]
        task_id: String,

        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Task table (JSON or YAML); defaults to `tasks_file` from config
        #[arg(long)]
        tasks_file: Option<PathBuf>,

        /// Force a fresh index instead of using the cache
        #[arg(long)]
        no_cache: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => OnboardConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => OnboardConfig::load(),
    };

    // Logs go to stderr so stdout stays clean for piping
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Index {
            root,
            output,
            llm,
            max_files,
            include_hidden,
            ignore,
        } => cmd_index(
            config,
            &root,
            output.as_deref(),
            llm,
            max_files,
            include_hidden,
            ignore,
        ),
        Commands::Tasks {
            file,
            task_id,
            assignee,
            json,
        } => cmd_tasks(&config, file, task_id, assignee, json),
        Commands::Prompt {
            task_id,
            root,
            tasks_file,
            no_cache,
        } => cmd_prompt(config, &task_id, &root, tasks_file, no_cache).await,
    }
}

fn cmd_index(
    config: OnboardConfig,
    root: &Path,
    output: Option<&Path>,
    llm: bool,
    max_files: Option<usize>,
    include_hidden: bool,
    extra_ignore: Vec<String>,
) -> Result<()> {
    let mut options = config.scan_options();
    options.include_hidden |= include_hidden;
    options.ignore_patterns.extend(extra_ignore);

    let records = Scanner::with_options(options)
        .scan(root)
        .with_context(|| format!("Failed to scan {}", root.display()))?;
    let index = build_index(&records);

    if let Some(out_path) = output {
        write_index(out_path, &index)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        eprintln!(
            "✓ Wrote index ({} files) to {}",
            index.total_files,
            out_path.display()
        );
    }

    if llm {
        let max_files = max_files.unwrap_or(config.max_index_files);
        println!("{}", format_index_for_llm(&index, max_files));
    } else if output.is_none() {
        println!("✓ Indexed {} files under {}", index.total_files, root.display());
        for (ext, paths) in &index.by_extension {
            println!("  {:<10} {}", ext, paths.len());
        }
    }

    Ok(())
}

fn resolve_tasks_file(config: &OnboardConfig, file: Option<PathBuf>) -> Result<PathBuf> {
    file.or_else(|| config.tasks_file.clone())
        .context("No task table given. Pass --file or set tasks_file in the config.")
}

fn cmd_tasks(
    config: &OnboardConfig,
    file: Option<PathBuf>,
    task_id: Option<String>,
    assignee: Option<String>,
    json: bool,
) -> Result<()> {
    let source = FileTaskSource::new(resolve_tasks_file(config, file)?);

    let tasks: Vec<TaskRecord> = match (task_id, assignee) {
        (Some(id), _) => match source.task_by_id(&id)? {
            Some(task) => vec![task],
            None => anyhow::bail!("Task '{}' not found", id),
        },
        (None, Some(name)) => source.tasks_for_assignee(&name)?,
        (None, None) => source.all_tasks()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    for task in &tasks {
        println!(
            "{:<12} {:<12} {:<16} {}",
            task.task_id,
            display_or_dash(&task.status),
            display_or_dash(&task.assignee),
            task.title
        );
        if !task.description.is_empty() {
            println!("{:>12} {}", "", task.description);
        }
    }

    Ok(())
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

async fn cmd_prompt(
    config: OnboardConfig,
    task_id: &str,
    root: &Path,
    tasks_file: Option<PathBuf>,
    no_cache: bool,
) -> Result<()> {
    let source = FileTaskSource::new(resolve_tasks_file(&config, tasks_file)?);
    let pipeline = Pipeline::new(config, Box::new(source));

    let request = pipeline
        .prepare(task_id, root, !no_cache)
        .await
        .context("Failed to prepare prompt")?;

    for message in &request.messages {
        println!("=== {} ===", message.role.as_str().to_uppercase());
        println!("{}", message.content);
        println!();
    }

    Ok(())
}
