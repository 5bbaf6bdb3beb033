use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;
mod telemetry;
mod tools;

use adapters::{
    AgentCoreMemoryClient, BedrockPromptStore, GooglePlacesClient, GoogleWeatherClient,
    OpenRouteServiceClient,
};
use application::PromptService;
use auth::ApiKey;
use config::Settings;
use placefinder::{
    PlacesService, PreferenceStore, PromptRegistry, PromptStore, RoutingService, WeatherService,
};
use tools::{ToolRegistry, ToolServices};

/// Prompt service over whichever prompt store the server was started with
pub type AppPromptService = PromptService<dyn PromptStore>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<ToolRegistry>,
    pub prompts: Arc<AppPromptService>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Place Finder is running - ready to plan the next trip".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("👋 Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    tracing::info!("🧭 Place Finder initializing...");

    let registry = PromptRegistry::with_builtin()?;
    let settings = Settings::from_env(&registry)?;

    let api_key = ApiKey::new(settings.api_key.clone());
    if api_key.is_enabled() {
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No PLACEFINDER_API_KEY set - authentication disabled");
    }

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(settings.aws_region.clone()))
        .load()
        .await;

    let mut services = ToolServices::default();

    match settings.google_places_api_key.as_deref() {
        Some(key) => {
            match GooglePlacesClient::new(key) {
                Ok(client) => {
                    tracing::info!("📍 Places tools enabled");
                    services.places = Some(Arc::new(client) as Arc<dyn PlacesService>);
                }
                Err(e) => tracing::warn!("⚠️  Failed to initialize Places client: {}", e),
            }
            match GoogleWeatherClient::new(key) {
                Ok(client) => {
                    tracing::info!("🌤️  Weather tools enabled");
                    services.weather = Some(Arc::new(client) as Arc<dyn WeatherService>);
                }
                Err(e) => tracing::warn!("⚠️  Failed to initialize Weather client: {}", e),
            }
        }
        None => {
            tracing::warn!("⚠️  No GOOGLE_PLACES_API_KEY set - Places and Weather tools disabled")
        }
    }

    match settings.open_route_service_api_key.as_deref() {
        Some(key) => match OpenRouteServiceClient::new(key) {
            Ok(client) => {
                tracing::info!("🗺️  Routing tools enabled");
                services.routing = Some(Arc::new(client) as Arc<dyn RoutingService>);
            }
            Err(e) => tracing::warn!("⚠️  Failed to initialize OpenRouteService client: {}", e),
        },
        None => tracing::warn!("⚠️  No OPEN_ROUTE_SERVICE_API_KEY set - Routing tools disabled"),
    }

    match settings.agentcore_memory_id.as_deref() {
        Some(memory_id) => match AgentCoreMemoryClient::new(&aws_config, memory_id) {
            Ok(client) => {
                tracing::info!("🧠 Preference memory enabled");
                services.preferences = Some(Arc::new(client) as Arc<dyn PreferenceStore>);
            }
            Err(e) => tracing::warn!("⚠️  Failed to initialize AgentCore Memory client: {}", e),
        },
        None => tracing::warn!("⚠️  No AGENTCORE_MEMORY_ID set - Preference tools disabled"),
    }

    // Managed prompts: push local templates before serving anything
    let prompt_store: Arc<dyn PromptStore> = Arc::new(BedrockPromptStore::new(&aws_config));
    let prompts = Arc::new(PromptService::new(
        prompt_store,
        registry,
        settings.remote_prompt_ids.clone(),
        settings.prompt_cache_ttl,
    ));
    let summary = prompts.sync_all_prompts().await;
    if summary.failed > 0 {
        tracing::warn!("⚠️  {} prompt(s) failed to sync - serving local text", summary.failed);
    } else {
        tracing::info!("📝 Prompts synced ({} updated)", summary.updated);
    }

    let tools = Arc::new(tools::build_registry(&services));
    tracing::info!("🧰 {} tool(s) registered", tools.len());

    let state = AppState { tools, prompts };

    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(routes::mcp::router())
        .layer(middleware::from_fn_with_state(api_key, auth::auth_middleware));

    let router = Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!("✅ Place Finder ready on http://{}/mcp", address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
