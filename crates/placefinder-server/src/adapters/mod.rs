//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod agentcore_memory;
pub mod bedrock_prompts;
pub mod formatters;
pub mod google_places;
pub mod google_weather;
pub mod open_route_service;

// Re-exports
pub use agentcore_memory::AgentCoreMemoryClient;
pub use bedrock_prompts::BedrockPromptStore;
pub use google_places::GooglePlacesClient;
pub use google_weather::GoogleWeatherClient;
pub use open_route_service::OpenRouteServiceClient;

use std::time::Duration;

use placefinder::DomainError;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

fn http_client(timeout: Duration) -> Result<Client, DomainError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))
}

fn request_failed(service: &str, err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::ExternalService(format!("{service} request timed out"))
    } else {
        DomainError::ExternalService(format!("{service} request failed: {err}"))
    }
}

/// Decode a JSON body, turning non-2xx statuses into domain errors
async fn read_json(response: Response, service: &str) -> Result<Value, DomainError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        return Err(map_http_error(service, status, body));
    }

    response
        .json()
        .await
        .map_err(|e| DomainError::ExternalService(format!("{service} returned invalid JSON: {e}")))
}

fn map_http_error(service: &str, status: StatusCode, body: String) -> DomainError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return DomainError::ExternalService(format!("{service} rate limit exceeded"));
    }

    // Google: {"error": {"message": ..}}, OpenRouteService: {"error": ".."} or the same
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| {
            let error = json.get("error")?;
            error
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| error.as_str())
                .map(str::to_string)
        })
        .unwrap_or(body);

    DomainError::ExternalService(format!(
        "{service} API error ({}): {message}",
        status.as_u16()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_http_error_extracts_message() {
        let err = map_http_error(
            "Google Places",
            StatusCode::BAD_REQUEST,
            r#"{"error": {"code": 400, "message": "Invalid place id"}}"#.to_string(),
        );
        assert_eq!(
            err.to_string(),
            "External service error: Google Places API error (400): Invalid place id"
        );
    }

    #[test]
    fn test_map_http_error_plain_bodies() {
        let err = map_http_error(
            "OpenRouteService",
            StatusCode::FORBIDDEN,
            r#"{"error": "Access to this API has been disallowed"}"#.to_string(),
        );
        assert!(err.to_string().contains("(403): Access to this API"));

        let err = map_http_error("x", StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert!(err.to_string().ends_with("(502): upstream down"));

        let err = map_http_error("x", StatusCode::TOO_MANY_REQUESTS, String::new());
        assert!(err.to_string().contains("rate limit"));
    }
}
