// Cookbook - Web Server
// REST API with Axum: /parse, /entry, /summary

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use cookbook::{
    init_logging, normalize_name, Cookbook, ResolutionError, ServerConfig, Summary, ValidationError,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state
#[derive(Clone)]
struct AppState {
    cookbook: Cookbook,
}

/// POST /parse request body
#[derive(Deserialize)]
struct ParseRequest {
    #[serde(default)]
    input: String,
}

/// POST /parse response body
#[derive(Serialize)]
struct ParseResponse {
    msg: String,
}

/// GET /summary query string
#[derive(Deserialize)]
struct SummaryQuery {
    name: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

// ============================================================================
// Errors
// ============================================================================

/// Every client-side failure is a 400 with a plain-text reason
enum ApiError {
    Validation(ValidationError),
    Resolution(ResolutionError),
    BadRequest(String),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<ResolutionError> for ApiError {
    fn from(e: ResolutionError) -> Self {
        ApiError::Resolution(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::Resolution(e) => e.to_string(),
            ApiError::BadRequest(message) => message,
        };

        (StatusCode::BAD_REQUEST, message).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// POST /parse - Normalize a handwritten name
async fn parse(payload: Result<Json<ParseRequest>, JsonRejection>) -> Response {
    let input = match payload {
        Ok(Json(request)) => request.input,
        Err(rejection) => return ApiError::from(rejection).into_response(),
    };

    match normalize_name(&input) {
        Some(msg) => (StatusCode::OK, Json(ParseResponse { msg })).into_response(),
        None => (StatusCode::BAD_REQUEST, "Invalid recipe name").into_response(),
    }
}

/// POST /entry - Add an ingredient or recipe
async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(raw) = payload?;
    state.cookbook.add_entry(&raw)?;
    Ok(StatusCode::OK)
}

/// GET /summary?name=... - Total cook time and base ingredients of a recipe
async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Summary>, ApiError> {
    let name = query.name.unwrap_or_default();
    let summary = state.cookbook.summarize(&name)?;
    Ok(Json(summary))
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/parse", post(parse))
        .route("/entry", post(create_entry))
        .route("/summary", get(summary))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let config = ServerConfig::parse();

    println!("🍳 Cookbook - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let state = AppState {
        cookbook: config.resolve.cookbook(),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(bind = %config.bind, max_depth = config.resolve.max_depth, "server listening");
    println!("\n🚀 Server running on http://{}", config.bind);
    println!("   POST /entry, GET /summary?name=..., POST /parse");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
