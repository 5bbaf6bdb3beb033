//! Preference Store Port
//!
//! Abstract interface for long-term user preference memory, scoped per actor.

use async_trait::async_trait;

use crate::domain::entities::PreferenceRecord;
use crate::domain::errors::DomainError;

/// Identifiers of a freshly stored preference
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPreference {
    pub actor_id: String,
    pub session_id: String,
}

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Record a preference statement for later extraction
    async fn store(&self, actor_id: &str, text: &str) -> Result<StoredPreference, DomainError>;

    /// Semantic search over an actor's preferences
    async fn search(
        &self,
        actor_id: &str,
        query: &str,
        top_k: u32,
    ) -> Result<Vec<PreferenceRecord>, DomainError>;

    async fn list(&self, actor_id: &str) -> Result<Vec<PreferenceRecord>, DomainError>;

    /// Fails with `DomainError::NotFound` for an unknown record
    async fn delete(&self, actor_id: &str, record_id: &str) -> Result<(), DomainError>;
}
