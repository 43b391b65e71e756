use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use llm_integration::{GeminiProvider, GroqProvider, IdeaProvider, ScriptProvider};
use server_api::{generate_ideas, generate_script, ApiContext};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{
        GenerateIdeasRequest, GenerateIdeasResponse, GenerateScriptRequest,
        GenerateScriptResponse, GENERATE_IDEAS_ROUTE, GENERATE_SCRIPT_ROUTE, HEALTHZ_ROUTE,
    },
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings()?;
    let ideas = GeminiProvider::new(settings.gemini_config()?)
        .context("failed to configure Gemini idea provider")?;
    let scripts = GroqProvider::new(settings.groq_config()?)
        .context("failed to configure Groq script provider")?;
    let state = AppState {
        api: ApiContext {
            ideas: Arc::new(ideas),
            scripts: Arc::new(scripts),
        },
    };
    info!(
        idea_model = state.api.ideas.model_name(),
        script_model = state.api.scripts.model_name(),
        "content providers configured"
    );
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(HEALTHZ_ROUTE, get(healthz))
        .route(GENERATE_IDEAS_ROUTE, post(http_generate_ideas))
        .route(GENERATE_SCRIPT_ROUTE, post(http_generate_script))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_generate_ideas(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateIdeasRequest>,
) -> Result<Json<GenerateIdeasResponse>, (StatusCode, Json<ApiError>)> {
    let ideas = generate_ideas(&state.api, &req.topic)
        .await
        .map_err(error_response)?;
    info!(topic = %req.topic.trim(), count = ideas.len(), "generated ideas");
    Ok(Json(GenerateIdeasResponse { ideas }))
}

async fn http_generate_script(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateScriptRequest>,
) -> Result<Json<GenerateScriptResponse>, (StatusCode, Json<ApiError>)> {
    let script = generate_script(&state.api, &req.idea)
        .await
        .map_err(error_response)?;
    info!(chars = script.chars().count(), "generated script");
    Ok(Json(GenerateScriptResponse { script }))
}

fn error_response(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Upstream | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(%status, message = %err.message, "generation request failed");
    (status, Json(err))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
