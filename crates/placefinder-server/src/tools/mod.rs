//! MCP tool catalog
//!
//! Each service contributes a list of `ToolDef`s which the registry mounts
//! under a namespace, exposing them to clients as `<namespace>_<tool>`.
//! Every invocation runs inside a `telemetry::traced` span.

pub mod places;
pub mod preferences;
pub mod routing;
pub mod weather;

use std::sync::Arc;

use async_trait::async_trait;
use placefinder::{
    Coordinates, DomainError, PlacesService, PreferenceStore, RoutingService, WeatherService,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::telemetry::{self, HandlerType};

/// A tool's execution handler
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError>;
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Failed(#[from] DomainError),

    #[error("Failed to encode tool output: {0}")]
    Output(String),
}

/// Behavior hints advertised with each tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolAnnotations {
    #[serde(rename = "readOnlyHint")]
    pub read_only: bool,
    #[serde(rename = "destructiveHint")]
    pub destructive: bool,
    #[serde(rename = "idempotentHint")]
    pub idempotent: bool,
    #[serde(rename = "openWorldHint")]
    pub open_world: bool,
}

impl ToolAnnotations {
    /// Lookup against an external API
    pub const fn read_only() -> Self {
        Self {
            read_only: true,
            destructive: false,
            idempotent: true,
            open_world: true,
        }
    }

    /// Write against an external store
    pub const fn write(destructive: bool, idempotent: bool) -> Self {
        Self {
            read_only: false,
            destructive,
            idempotent,
            open_world: true,
        }
    }
}

/// A tool definition: what clients see plus the handler that runs it
pub struct ToolDef {
    pub name: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub annotations: ToolAnnotations,
    pub input_schema: Value,
    pub(crate) handler: Arc<dyn ToolHandler>,
}

impl ToolDef {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: description.into(),
            tags: Vec::new(),
            annotations: ToolAnnotations::read_only(),
            input_schema,
            handler: Arc::new(handler),
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_annotations(mut self, annotations: ToolAnnotations) -> Self {
        self.annotations = annotations;
        self
    }
}

struct MountedTool {
    qualified_name: String,
    def: ToolDef,
}

/// Namespaced tool catalog
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<MountedTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `defs` under `namespace`. A later mount replaces an earlier
    /// tool with the same qualified name.
    pub fn mount(&mut self, namespace: &str, defs: Vec<ToolDef>) -> &mut Self {
        for def in defs {
            let qualified_name = format!("{namespace}_{}", def.name);
            self.tools.retain(|t| t.qualified_name != qualified_name);
            self.tools.push(MountedTool {
                qualified_name,
                def,
            });
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDef> {
        self.tools
            .iter()
            .find(|t| t.qualified_name == name)
            .map(|t| &t.def)
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.qualified_name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// `tools/list` entries
    pub fn list(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|t| {
                json!({
                    "name": t.qualified_name,
                    "title": t.def.title,
                    "description": t.def.description,
                    "inputSchema": t.def.input_schema,
                    "annotations": t.def.annotations,
                    "_meta": { "tags": t.def.tags },
                })
            })
            .collect()
    }

    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.qualified_name == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let span_name = format!("mcp.tool.{}", tool.def.name);
        let params = arguments.clone();
        telemetry::traced(
            &span_name,
            HandlerType::Tool,
            &params,
            tool.def.handler.call(arguments),
        )
        .await
    }
}

/// External services backing the tool catalog. A missing service leaves
/// its namespace unmounted.
#[derive(Clone, Default)]
pub struct ToolServices {
    pub places: Option<Arc<dyn PlacesService>>,
    pub weather: Option<Arc<dyn WeatherService>>,
    pub routing: Option<Arc<dyn RoutingService>>,
    pub preferences: Option<Arc<dyn PreferenceStore>>,
}

pub fn build_registry(services: &ToolServices) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    if let Some(service) = &services.places {
        registry.mount("places", places::tools(service.clone()));
    }
    if let Some(service) = &services.weather {
        registry.mount("weather", weather::tools(service.clone()));
    }
    if let Some(service) = &services.routing {
        registry.mount("routing", routing::tools(service.clone()));
    }
    if let Some(service) = &services.preferences {
        registry.mount("preferences", preferences::tools(service.clone()));
    }
    registry
}

/// Deserialize tool arguments; absent arguments count as an empty object.
pub fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

pub fn to_output<T: Serialize>(output: &T) -> Result<Value, ToolError> {
    serde_json::to_value(output).map_err(|e| ToolError::Output(e.to_string()))
}

/// Validate a latitude/longitude argument pair
pub fn coordinates(latitude: f64, longitude: f64) -> Result<Coordinates, ToolError> {
    Coordinates::try_new(latitude, longitude).map_err(invalid)
}

/// Argument validation failures surface as invalid arguments, not upstream
/// failures
pub fn invalid(err: DomainError) -> ToolError {
    match err {
        DomainError::Validation(message) => ToolError::InvalidArguments(message),
        other => ToolError::Failed(other),
    }
}

/// Reject blank required string arguments
pub fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, ToolError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ToolError::InvalidArguments(format!("{field} must not be empty")))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl ToolHandler for Echo {
        async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
            Ok(arguments)
        }
    }

    struct Broken;

    #[async_trait]
    impl ToolHandler for Broken {
        async fn call(&self, _arguments: Value) -> Result<Value, ToolError> {
            Err(DomainError::ExternalService("upstream down".to_string()).into())
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.mount(
            "demo",
            vec![
                ToolDef::new("echo", "Echo", "Echo the arguments", json!({"type": "object"}), Echo)
                    .with_tags(["demo"]),
                ToolDef::new("broken", "Broken", "Always fails", json!({"type": "object"}), Broken)
                    .with_annotations(ToolAnnotations::write(true, false)),
            ],
        );
        registry
    }

    #[test]
    fn test_mount_prefixes_namespace() {
        let registry = registry();
        assert_eq!(registry.tool_names(), vec!["demo_echo", "demo_broken"]);
        assert!(registry.get("demo_echo").is_some());
        assert!(registry.get("echo").is_none());
    }

    #[test]
    fn test_list_shape() {
        let listed = registry().list();
        assert_eq!(listed[0]["name"], "demo_echo");
        assert_eq!(listed[0]["title"], "Echo");
        assert_eq!(listed[0]["annotations"]["readOnlyHint"], true);
        assert_eq!(listed[0]["_meta"]["tags"][0], "demo");
        assert_eq!(listed[1]["annotations"]["destructiveHint"], true);
        assert_eq!(listed[1]["annotations"]["idempotentHint"], false);
    }

    #[test]
    fn test_remount_replaces_tool() {
        let mut registry = registry();
        registry.mount(
            "demo",
            vec![ToolDef::new("echo", "Echo 2", "", json!({}), Echo)],
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("demo_echo").map(|t| t.title.as_str()), Some("Echo 2"));
    }

    #[tokio::test]
    async fn test_invoke_dispatches_and_reports_failures() {
        let registry = registry();

        let out = registry.invoke("demo_echo", json!({"a": 1})).await.unwrap();
        assert_eq!(out, json!({"a": 1}));

        let err = registry.invoke("demo_broken", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::Failed(DomainError::ExternalService(_))));

        let err = registry.invoke("demo_missing", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(name) if name == "demo_missing"));
    }

    #[test]
    fn test_parse_arguments_treats_null_as_empty() {
        #[derive(Debug, serde::Deserialize)]
        struct Args {
            #[serde(default)]
            count: u32,
        }

        let args: Args = parse_arguments(Value::Null).unwrap();
        assert_eq!(args.count, 0);

        let err = parse_arguments::<Args>(json!({"count": "three"})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_build_registry_skips_missing_services() {
        assert!(build_registry(&ToolServices::default()).is_empty());
    }

    #[test]
    fn test_validation_helpers() {
        assert!(coordinates(91.0, 0.0).is_err());
        assert!(matches!(required("actor_id", "  "), Err(ToolError::InvalidArguments(_))));
        assert_eq!(required("actor_id", " u1 ").unwrap(), "u1");
    }
}
