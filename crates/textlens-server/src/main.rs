use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod config;
mod error;
mod extract;
mod models;
mod routes;
mod views;

use adapters::openai::build_http_client;
use adapters::{OpenAiCompletionClient, OpenAiEmbeddingClient};
use application::AnalysisService;
use config::{AppConfig, StoreLocation};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub analysis: Arc<AnalysisService>,
}

#[cfg(test)]
impl AppState {
    pub fn for_test(
        completion: Arc<dyn textlens::CompletionService>,
        embedding: Arc<dyn textlens::EmbeddingService>,
        store: Option<config::StoreConfig>,
        server_api_key: Option<String>,
    ) -> Self {
        let config = AppConfig {
            api_key: "test-key".to_string(),
            completion_url: "http://127.0.0.1:9/chat".to_string(),
            embedding_url: "http://127.0.0.1:9/embed".to_string(),
            store: store.clone(),
            request_timeout: None,
            server_api_key,
            bind_addr: ([127, 0, 0, 1], 0).into(),
        };
        Self {
            config: Arc::new(config),
            analysis: Arc::new(AnalysisService::new(completion, embedding, store)),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthCheck)
    ),
    tag = "Health"
)]
async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "TextLens API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication when a key is configured)
    let protected_routes = Router::new()
        .merge(routes::analyze::router())
        .merge(routes::api::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::form::router())
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,textlens_server=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🔎 TextLens API initializing...");

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let http = build_http_client(config.request_timeout).context("Failed to build HTTP client")?;
    if let Some(timeout) = config.request_timeout {
        tracing::info!("⏱️  Model request timeout: {}s", timeout.as_secs());
    }

    let completion = Arc::new(OpenAiCompletionClient::new(
        http.clone(),
        config.completion_url.clone(),
        config.api_key.clone(),
    ));
    let embedding = Arc::new(OpenAiEmbeddingClient::new(
        http,
        config.embedding_url.clone(),
        config.api_key.clone(),
    ));
    tracing::info!("🧬 Completion and embedding clients initialized");

    match &config.store {
        Some(store) => match &store.location {
            StoreLocation::Postgres(_) => {
                tracing::info!("🗄️  Document store: Postgres (collection '{}')", store.collection)
            }
            StoreLocation::File(path) => tracing::info!(
                "🗄️  Document store: {} (collection '{}')",
                path.display(),
                store.collection
            ),
        },
        None => tracing::warn!("⚠️  No DOCUMENT_STORE_URI set - collection vectorization disabled"),
    }

    if config.server_api_key.is_some() {
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No TEXTLENS_API_KEY set - authentication disabled");
    }

    let analysis = Arc::new(AnalysisService::new(
        completion,
        embedding,
        config.store.clone(),
    ));
    let bind_addr = config.bind_addr;
    let state = AppState {
        config: Arc::new(config),
        analysis,
    };

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ TextLens API listening on {}", bind_addr);

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
