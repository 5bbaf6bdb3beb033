//! Bedrock AgentCore Memory client
//!
//! Preferences are written as short conversational events; the memory's
//! long-term strategy extracts them into records under
//! `/preferences/{actor_id}/`, which are then searched, listed and deleted.

use async_trait::async_trait;
use aws_sdk_bedrockagentcore::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_bedrockagentcore::primitives::DateTime;
use aws_sdk_bedrockagentcore::types::{
    Content, Conversational, MemoryRecordSummary, PayloadType, Role, SearchCriteria,
};
use aws_sdk_bedrockagentcore::Client;
use uuid::Uuid;

use placefinder::{DomainError, PreferenceRecord, PreferenceStore, StoredPreference};

const NOT_FOUND_CODE: &str = "ResourceNotFoundException";

fn preference_namespace(actor_id: &str) -> String {
    format!("/preferences/{actor_id}/")
}

fn new_session_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("pref-{}", &id[..12])
}

fn sdk_error<E>(action: &str, err: E) -> DomainError
where
    E: std::error::Error + 'static,
{
    DomainError::ExternalService(format!(
        "AgentCore Memory {action} failed: {}",
        DisplayErrorContext(err)
    ))
}

fn build_error(err: impl std::fmt::Display) -> DomainError {
    DomainError::ExternalService(format!("Invalid AgentCore Memory request: {err}"))
}

fn turn(text: String, role: Role) -> Result<PayloadType, DomainError> {
    let message = Conversational::builder()
        .content(Content::Text(text))
        .role(role)
        .build()
        .map_err(build_error)?;
    Ok(PayloadType::Conversational(message))
}

fn to_record(summary: &MemoryRecordSummary) -> PreferenceRecord {
    let created_at = summary.created_at();

    PreferenceRecord {
        record_id: Some(summary.memory_record_id().to_string()),
        content: summary
            .content()
            .and_then(|c| c.as_text().ok())
            .map(|text| text.to_string()),
        namespace: summary.namespaces().first().cloned(),
        created_at: chrono::DateTime::from_timestamp(created_at.secs(), created_at.subsec_nanos())
            .map(|t| t.to_rfc3339()),
        relevance_score: summary.score(),
    }
}

/// Fold a `DeleteMemoryRecord` result; a missing record is `NotFound`
fn fold_delete_record<T, E>(result: Result<T, E>, record_id: &str) -> Result<(), DomainError>
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.code() == Some(NOT_FOUND_CODE) => {
            Err(DomainError::not_found("Preference", record_id))
        }
        Err(e) => Err(sdk_error("DeleteMemoryRecord", e)),
    }
}

/// `PreferenceStore` backed by AgentCore long-term memory
pub struct AgentCoreMemoryClient {
    client: Client,
    memory_id: String,
}

impl AgentCoreMemoryClient {
    pub fn new(config: &aws_config::SdkConfig, memory_id: impl Into<String>) -> Result<Self, DomainError> {
        let memory_id = memory_id.into();
        if memory_id.is_empty() {
            return Err(DomainError::missing_setting("AGENTCORE_MEMORY_ID"));
        }
        Ok(Self {
            client: Client::new(config),
            memory_id,
        })
    }
}

#[async_trait]
impl PreferenceStore for AgentCoreMemoryClient {
    async fn store(&self, actor_id: &str, text: &str) -> Result<StoredPreference, DomainError> {
        let session_id = new_session_id();
        tracing::debug!("Storing preference: actor={}, session={}", actor_id, session_id);

        self.client
            .create_event()
            .memory_id(&self.memory_id)
            .actor_id(actor_id)
            .session_id(&session_id)
            .event_timestamp(DateTime::from_secs(chrono::Utc::now().timestamp()))
            .payload(turn(text.to_string(), Role::User)?)
            .payload(turn(format!("Preference noted: {text}"), Role::Assistant)?)
            .send()
            .await
            .map_err(|e| sdk_error("CreateEvent", e))?;

        Ok(StoredPreference {
            actor_id: actor_id.to_string(),
            session_id,
        })
    }

    async fn search(
        &self,
        actor_id: &str,
        query: &str,
        top_k: u32,
    ) -> Result<Vec<PreferenceRecord>, DomainError> {
        tracing::debug!("Searching preferences: actor={}, query={:?}", actor_id, query);

        let criteria = SearchCriteria::builder()
            .search_query(query)
            .top_k(i32::try_from(top_k).unwrap_or(i32::MAX))
            .build()
            .map_err(build_error)?;

        let output = self
            .client
            .retrieve_memory_records()
            .memory_id(&self.memory_id)
            .namespace(preference_namespace(actor_id))
            .search_criteria(criteria)
            .send()
            .await
            .map_err(|e| sdk_error("RetrieveMemoryRecords", e))?;

        Ok(output.memory_record_summaries().iter().map(to_record).collect())
    }

    async fn list(&self, actor_id: &str) -> Result<Vec<PreferenceRecord>, DomainError> {
        tracing::debug!("Listing preferences: actor={}", actor_id);

        let mut records = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let output = self
                .client
                .list_memory_records()
                .memory_id(&self.memory_id)
                .namespace(preference_namespace(actor_id))
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| sdk_error("ListMemoryRecords", e))?;

            records.extend(output.memory_record_summaries().iter().map(to_record));

            match output.next_token().filter(|t| !t.is_empty()) {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }
        Ok(records)
    }

    async fn delete(&self, actor_id: &str, record_id: &str) -> Result<(), DomainError> {
        tracing::debug!("Deleting preference: actor={}, record={}", actor_id, record_id);

        let result = self
            .client
            .delete_memory_record()
            .memory_id(&self.memory_id)
            .memory_record_id(record_id)
            .send()
            .await;

        fold_delete_record(result, record_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_bedrockagentcore::error::ErrorMetadata;
    use aws_sdk_bedrockagentcore::operation::delete_memory_record::DeleteMemoryRecordError;
    use aws_sdk_bedrockagentcore::types::MemoryContent;

    fn delete_error(code: &str) -> DeleteMemoryRecordError {
        DeleteMemoryRecordError::generic(ErrorMetadata::builder().code(code).build())
    }

    #[test]
    fn test_namespace_is_scoped_per_actor() {
        assert_eq!(preference_namespace("user-42"), "/preferences/user-42/");
    }

    #[test]
    fn test_session_ids_are_fresh() {
        let a = new_session_id();
        let b = new_session_id();
        assert!(a.starts_with("pref-"));
        assert_eq!(a.len(), "pref-".len() + 12);
        assert!(a["pref-".len()..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_delete_of_missing_record_is_not_found() {
        let result = fold_delete_record::<(), _>(Err(delete_error(NOT_FOUND_CODE)), "rec-9");
        assert!(matches!(result, Err(DomainError::NotFound { .. })));

        let result = fold_delete_record::<(), _>(Err(delete_error("AccessDeniedException")), "rec-9");
        assert!(matches!(result, Err(DomainError::ExternalService(_))));

        assert!(fold_delete_record::<(), DeleteMemoryRecordError>(Ok(()), "rec-9").is_ok());
    }

    #[test]
    fn test_record_summary_maps_to_preference() {
        let summary = MemoryRecordSummary::builder()
            .memory_record_id("rec-1")
            .content(MemoryContent::Text("Prefers window seats".to_string()))
            .memory_strategy_id("preferences")
            .namespaces("/preferences/user-42/")
            .created_at(DateTime::from_secs(1_700_000_000))
            .score(0.82)
            .build()
            .unwrap();

        let record = to_record(&summary);

        assert_eq!(record.record_id.as_deref(), Some("rec-1"));
        assert_eq!(record.content.as_deref(), Some("Prefers window seats"));
        assert_eq!(record.namespace.as_deref(), Some("/preferences/user-42/"));
        assert_eq!(record.created_at.as_deref(), Some("2023-11-14T22:13:20+00:00"));
        assert_eq!(record.relevance_score, Some(0.82));
    }

    #[test]
    fn test_memory_id_required() {
        let config = aws_config::SdkConfig::builder().build();
        assert!(matches!(
            AgentCoreMemoryClient::new(&config, ""),
            Err(DomainError::Configuration(_))
        ));
    }
}
