//! MCP Routes - JSON-RPC 2.0 over a single HTTP endpoint
//!
//! POST /mcp accepts one request or notification per call. Tool failures
//! are reported inside a successful result with `isError: true`; protocol
//! problems use JSON-RPC error codes.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use placefinder::{DomainError, PromptRegistry};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{field, Instrument};
use uuid::Uuid;

use crate::models::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, PromptGetParams, ToolCallParams,
    JSONRPC_VERSION, PROTOCOL_VERSION, SESSION_HEADER,
};
use crate::telemetry::{self, HandlerType};
use crate::tools::ToolError;
use crate::AppState;

const SERVER_NAME: &str = "placefinder-server";

const INSTRUCTIONS: &str = "Place Finder tools for trip planning: place search, weather, \
routing and long-term user preferences. Tool names are prefixed with their namespace.";

/// Handle one JSON-RPC message
///
/// POST /mcp
pub async fn handle_mcp(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let session_id = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected malformed JSON-RPC message: {}", e);
            let error = JsonRpcError::parse_error(format!("Parse error: {e}"));
            return Json(JsonRpcResponse::failure(Value::Null, error)).into_response();
        }
    };

    let span = tracing::info_span!(
        "mcp.request",
        mcp.method = %request.method,
        mcp.session_id = field::Empty,
    );
    if let Some(session) = session_id.as_deref() {
        span.record("mcp.session_id", session);
    }

    if request.jsonrpc != JSONRPC_VERSION {
        let error = JsonRpcError::invalid_request(format!(
            "Unsupported jsonrpc version {:?}",
            request.jsonrpc
        ));
        let id = request.id.unwrap_or(Value::Null);
        return Json(JsonRpcResponse::failure(id, error)).into_response();
    }

    if request.is_notification() {
        if !request.method.starts_with("notifications/") {
            tracing::debug!("Ignoring {} sent as a notification", request.method);
        }
        return StatusCode::ACCEPTED.into_response();
    }

    let is_initialize = request.method == "initialize";
    let id = request.id.clone().unwrap_or(Value::Null);
    let response = match dispatch(&state, request).instrument(span).await {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(error) => JsonRpcResponse::failure(id, error),
    };

    let mut response = Json(response).into_response();
    if is_initialize {
        let assigned = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        if let Ok(value) = HeaderValue::from_str(&assigned) {
            response.headers_mut().insert(SESSION_HEADER, value);
        }
        tracing::info!("MCP session initialized: {}", assigned);
    }
    response
}

async fn dispatch(state: &AppState, request: JsonRpcRequest) -> Result<Value, JsonRpcError> {
    match request.method.as_str() {
        "initialize" => Ok(initialize_result()),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": state.tools.list() })),
        "tools/call" => call_tool(state, parse_params(request.params)?).await,
        "prompts/list" => Ok(json!({ "prompts": list_prompts(state.prompts.registry()) })),
        "prompts/get" => get_prompt(state, parse_params(request.params)?).await,
        other => Err(JsonRpcError::method_not_found(other)),
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {e}")))
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false },
            "prompts": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "instructions": INSTRUCTIONS
    })
}

async fn call_tool(state: &AppState, params: ToolCallParams) -> Result<Value, JsonRpcError> {
    match state.tools.invoke(&params.name, params.arguments).await {
        Ok(output) => Ok(json!({
            "content": [{ "type": "text", "text": output.to_string() }],
            "structuredContent": output,
            "isError": false
        })),
        Err(ToolError::UnknownTool(name)) => {
            Err(JsonRpcError::invalid_params(format!("Unknown tool: {name}")))
        }
        Err(e) => Ok(json!({
            "content": [{ "type": "text", "text": e.to_string() }],
            "isError": true
        })),
    }
}

fn list_prompts(registry: &PromptRegistry) -> Vec<Value> {
    registry
        .iter()
        .map(|definition| {
            let arguments: Vec<Value> = definition
                .variables()
                .iter()
                .map(|name| json!({ "name": name, "required": false }))
                .collect();
            json!({
                "name": definition.name(),
                "title": definition.title(),
                "description": definition.description(),
                "arguments": arguments,
                "_meta": { "tags": definition.tags() }
            })
        })
        .collect()
}

async fn get_prompt(state: &AppState, params: PromptGetParams) -> Result<Value, JsonRpcError> {
    let description = state
        .prompts
        .registry()
        .get(&params.name)
        .map(|d| d.description().to_string())
        .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown prompt: {}", params.name)))?;

    let span_name = format!("mcp.prompt.{}", params.name);
    let traced_params = json!({ "name": params.name, "arguments": params.arguments });
    let text = telemetry::traced(
        &span_name,
        HandlerType::Prompt,
        &traced_params,
        state.prompts.render_prompt(&params.name, &params.arguments),
    )
    .await
    .map_err(|e| match e {
        e @ DomainError::UnknownPrompt(_) => JsonRpcError::invalid_params(e.to_string()),
        e => JsonRpcError::internal(e.to_string()),
    })?;

    Ok(json!({
        "description": description,
        "messages": [{
            "role": "user",
            "content": { "type": "text", "text": text }
        }]
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/mcp", post(handle_mcp))
}
