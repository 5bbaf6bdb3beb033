//! Prompt Store Port
//!
//! Abstract interface for a remote managed-prompt registry holding one
//! mutable draft plus numbered immutable versions per prompt.

use async_trait::async_trait;

use crate::domain::entities::PromptDefinition;
use crate::domain::errors::DomainError;

/// A prompt as fetched from the remote store
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePrompt {
    pub name: String,
    pub text: String,
    pub variables: Vec<String>,
    /// Version label, `DRAFT` for the working copy
    pub version: String,
}

/// One page of numbered version labels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionPage {
    pub versions: Vec<String>,
    /// Continuation token, `None` on the last page
    pub next_token: Option<String>,
}

/// Result of an idempotent delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The version did not exist; treated as success
    AlreadyAbsent,
}

#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Fetch the draft, or a specific numbered version
    async fn get_prompt(
        &self,
        prompt_id: &str,
        version: Option<&str>,
    ) -> Result<RemotePrompt, DomainError>;

    /// Overwrite the draft's text, variables and model parameters
    async fn update_draft(
        &self,
        prompt_id: &str,
        name: &str,
        definition: &PromptDefinition,
    ) -> Result<(), DomainError>;

    /// Snapshot the current draft; returns the new version label
    async fn create_version(
        &self,
        prompt_id: &str,
        description: &str,
    ) -> Result<String, DomainError>;

    /// List one page of versions. The page may include the draft entry.
    async fn list_versions(
        &self,
        prompt_id: &str,
        next_token: Option<&str>,
    ) -> Result<VersionPage, DomainError>;

    async fn delete_version(
        &self,
        prompt_id: &str,
        version: &str,
    ) -> Result<DeleteOutcome, DomainError>;
}
