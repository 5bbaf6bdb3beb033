//! Preference - Long-term user preference memory

use serde::{Deserialize, Serialize};

/// A stored preference record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub record_id: Option<String>,
    pub content: Option<String>,
    pub namespace: Option<String>,
    pub created_at: Option<String>,
    /// Semantic search relevance score (only set by searches)
    pub relevance_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceListResponse {
    pub count: usize,
    pub preferences: Vec<PreferenceRecord>,
}

impl PreferenceListResponse {
    pub fn new(preferences: Vec<PreferenceRecord>) -> Self {
        Self {
            count: preferences.len(),
            preferences,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePreferenceResponse {
    pub status: String,
    pub actor_id: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePreferenceResponse {
    pub status: String,
    pub actor_id: Option<String>,
    pub record_id: Option<String>,
}
