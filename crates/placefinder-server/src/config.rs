//! Server configuration
//!
//! Settings come from environment variables, optionally seeded from a
//! `.env` file. Empty values are treated as unset.

use std::collections::HashMap;
use std::time::Duration;

use placefinder::PromptRegistry;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_AWS_REGION: &str = "us-east-2";
const DEFAULT_PROMPT_CACHE_TTL_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Server settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub aws_region: String,
    pub agentcore_memory_id: Option<String>,
    /// Used for both the Places and the Weather API
    pub google_places_api_key: Option<String>,
    pub open_route_service_api_key: Option<String>,
    pub prompt_cache_ttl: Duration,
    /// Bearer token guarding `/mcp`; auth is disabled when unset
    pub api_key: Option<String>,
    /// Remote prompt identifiers keyed by each definition's configuration key
    pub remote_prompt_ids: HashMap<String, String>,
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env(registry: &PromptRegistry) -> Result<Self, ConfigError> {
        Self::from_lookup(registry, |key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary lookup function
    pub fn from_lookup<F>(registry: &PromptRegistry, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                key: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let ttl_secs = match get("PROMPT_CACHE_TTL_SECONDS") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                key: "PROMPT_CACHE_TTL_SECONDS",
                value,
            })?,
            None => DEFAULT_PROMPT_CACHE_TTL_SECS,
        };

        let remote_prompt_ids = registry
            .iter()
            .filter_map(|def| {
                let key = def.remote_id_key();
                get(key).map(|id| (key.to_string(), id))
            })
            .collect();

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            aws_region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            agentcore_memory_id: get("AGENTCORE_MEMORY_ID"),
            google_places_api_key: get("GOOGLE_PLACES_API_KEY"),
            open_route_service_api_key: get("OPEN_ROUTE_SERVICE_API_KEY"),
            prompt_cache_ttl: Duration::from_secs(ttl_secs),
            api_key: get("PLACEFINDER_API_KEY"),
            remote_prompt_ids,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
