//! Onboard Core Components
//!
//! Configuration, task sources, guide prompts and the pipeline that turns a
//! task plus a codebase index into a step-by-step onboarding guide.

mod config;
mod error;
pub mod guide;
pub mod pipeline;
pub mod task;

pub use config::OnboardConfig;
pub use error::{CoreError, Result};
pub use guide::{truncate_context, ChatMessage, ChatRole, TaskGuide};
pub use pipeline::{ChatModel, GuideRequest, Pipeline, PipelineResult};
pub use task::{FileTaskSource, TaskRecord, TaskSource};
