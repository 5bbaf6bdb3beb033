//! User preference memory tools
//!
//! Preferences are scoped per actor; every tool takes the actor ID.

use std::sync::Arc;

use async_trait::async_trait;
use placefinder::{
    DeletePreferenceResponse, PreferenceListResponse, PreferenceStore, StorePreferenceResponse,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    parse_arguments, required, to_output, ToolAnnotations, ToolDef, ToolError, ToolHandler,
};

fn default_max_results() -> u32 {
    5
}

fn internal_lookup() -> ToolAnnotations {
    ToolAnnotations {
        open_world: false,
        ..ToolAnnotations::read_only()
    }
}

pub fn tools(store: Arc<dyn PreferenceStore>) -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "store_user_preference",
            "Store User Preference",
            "Remember a travel preference for a user, e.g. \"prefers window seats\" or \
             \"vegetarian\".",
            json!({
                "type": "object",
                "properties": {
                    "actor_id": { "type": "string", "description": "User identifier" },
                    "preference_text": { "type": "string" }
                },
                "required": ["actor_id", "preference_text"]
            }),
            StorePreference(store.clone()),
        )
        .with_tags(["preferences", "memory"])
        .with_annotations(ToolAnnotations {
            open_world: false,
            ..ToolAnnotations::write(false, false)
        }),
        ToolDef::new(
            "get_user_preferences",
            "Get User Preferences",
            "Find a user's stored preferences relevant to a query.",
            json!({
                "type": "object",
                "properties": {
                    "actor_id": { "type": "string" },
                    "query": { "type": "string", "description": "What to look for, e.g. \"food\"" },
                    "max_results": { "type": "integer", "minimum": 1, "default": 5 }
                },
                "required": ["actor_id", "query"]
            }),
            SearchPreferences(store.clone()),
        )
        .with_tags(["preferences", "memory", "search"])
        .with_annotations(internal_lookup()),
        ToolDef::new(
            "list_user_preferences",
            "List User Preferences",
            "List every stored preference for a user.",
            json!({
                "type": "object",
                "properties": {
                    "actor_id": { "type": "string" }
                },
                "required": ["actor_id"]
            }),
            ListPreferences(store.clone()),
        )
        .with_tags(["preferences", "memory"])
        .with_annotations(internal_lookup()),
        ToolDef::new(
            "delete_user_preference",
            "Delete User Preference",
            "Delete one stored preference by record ID.",
            json!({
                "type": "object",
                "properties": {
                    "actor_id": { "type": "string" },
                    "record_id": { "type": "string" }
                },
                "required": ["actor_id", "record_id"]
            }),
            DeletePreference(store),
        )
        .with_tags(["preferences", "memory"])
        .with_annotations(ToolAnnotations {
            open_world: false,
            ..ToolAnnotations::write(true, true)
        }),
    ]
}

#[derive(Debug, Deserialize)]
struct StoreArgs {
    actor_id: String,
    preference_text: String,
}

struct StorePreference(Arc<dyn PreferenceStore>);

#[async_trait]
impl ToolHandler for StorePreference {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: StoreArgs = parse_arguments(arguments)?;
        let actor_id = required("actor_id", &args.actor_id)?;
        let text = required("preference_text", &args.preference_text)?;

        let stored = self.0.store(actor_id, text).await?;
        to_output(&StorePreferenceResponse {
            status: "stored".to_string(),
            actor_id: Some(stored.actor_id),
            session_id: Some(stored.session_id),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    actor_id: String,
    query: String,
    #[serde(default = "default_max_results")]
    max_results: u32,
}

struct SearchPreferences(Arc<dyn PreferenceStore>);

#[async_trait]
impl ToolHandler for SearchPreferences {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: SearchArgs = parse_arguments(arguments)?;
        let actor_id = required("actor_id", &args.actor_id)?;
        let query = required("query", &args.query)?;

        let records = self.0.search(actor_id, query, args.max_results).await?;
        to_output(&PreferenceListResponse::new(records))
    }
}

#[derive(Debug, Deserialize)]
struct ListArgs {
    actor_id: String,
}

struct ListPreferences(Arc<dyn PreferenceStore>);

#[async_trait]
impl ToolHandler for ListPreferences {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: ListArgs = parse_arguments(arguments)?;
        let records = self.0.list(required("actor_id", &args.actor_id)?).await?;
        to_output(&PreferenceListResponse::new(records))
    }
}

#[derive(Debug, Deserialize)]
struct DeleteArgs {
    actor_id: String,
    record_id: String,
}

struct DeletePreference(Arc<dyn PreferenceStore>);

#[async_trait]
impl ToolHandler for DeletePreference {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: DeleteArgs = parse_arguments(arguments)?;
        let actor_id = required("actor_id", &args.actor_id)?;
        let record_id = required("record_id", &args.record_id)?;

        self.0.delete(actor_id, record_id).await?;
        to_output(&DeletePreferenceResponse {
            status: "deleted".to_string(),
            actor_id: Some(actor_id.to_string()),
            record_id: Some(record_id.to_string()),
        })
    }
}
