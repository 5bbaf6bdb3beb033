//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! the prompt registry and external services.

mod prompt_service;

pub use prompt_service::{PromptService, SyncOutcome, SyncStage, SyncSummary, VersionLimit};
