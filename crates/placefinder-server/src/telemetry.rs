//! Tracing setup and handler instrumentation
//!
//! Every tool and prompt invocation runs inside a span carrying the handler
//! type, its bound parameters, the elapsed time and the outcome.

use std::fmt::Display;
use std::future::Future;

use serde_json::Value;
use tokio::time::Instant;
use tracing::{field, Instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,placefinder_server=debug";

/// Install the global `fmt` subscriber, honoring `RUST_LOG`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerType {
    Tool,
    Prompt,
}

impl HandlerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerType::Tool => "tool",
            HandlerType::Prompt => "prompt",
        }
    }
}

/// Run `handler` inside an `mcp.handler` span named `span_name`.
///
/// The handler's result is returned unchanged. Completion is logged at
/// debug, failure at error.
pub async fn traced<T, E, F>(
    span_name: &str,
    handler_type: HandlerType,
    params: &Value,
    handler: F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let span = tracing::info_span!(
        "mcp.handler",
        mcp.span = %span_name,
        mcp.handler.type = handler_type.as_str(),
        mcp.params = %params,
        duration_ms = field::Empty,
        success = field::Empty,
    );

    let started = Instant::now();
    let result = handler.instrument(span.clone()).await;
    let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

    span.record("duration_ms", duration_ms);
    span.record("success", result.is_ok());

    let _entered = span.enter();
    match &result {
        Ok(_) => tracing::debug!("[trace] {} completed in {:.1}ms", span_name, duration_ms),
        Err(e) => tracing::error!(
            "[trace] {} failed after {:.1}ms: {}",
            span_name,
            duration_ms,
            e
        ),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_passes_result_through() {
        let ok: Result<u32, String> =
            traced("mcp.tool.demo", HandlerType::Tool, &json!({"a": 1}), async { Ok(7) }).await;
        assert_eq!(ok, Ok(7));

        let err: Result<u32, String> = traced(
            "mcp.prompt.demo",
            HandlerType::Prompt,
            &Value::Null,
            async { Err("boom".to_string()) },
        )
        .await;
        assert_eq!(err, Err("boom".to_string()));
    }

    #[test]
    fn test_handler_type_labels() {
        assert_eq!(HandlerType::Tool.as_str(), "tool");
        assert_eq!(HandlerType::Prompt.as_str(), "prompt");
    }
}
