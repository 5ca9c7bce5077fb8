//! Service Routes
//!
//! Liveness, readiness and the API welcome.

use axum::{Json, Router, extract::State, routing::get};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use serde_json::{Value, json};
use sqlx::PgPool;

pub const API_VERSION: &str = "1.0.0";

pub fn service_router(pool: PgPool) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api", get(welcome))
        .with_state(pool)
}

/// GET /
async fn root() -> Json<Value> {
    Json(json!({ "message": "Zione API is running!" }))
}

/// GET /health
async fn health(State(pool): State<PgPool>) -> Result<Json<Value>, AppError> {
    sqlx::query("SELECT 1").execute(&pool).await.map_err(|e| {
        tracing::warn!(error = %e, "Health check failed");
        AppError::new(ErrorKind::ServiceUnavailable, "Database unavailable")
    })?;

    Ok(Json(json!({ "status": "OK" })))
}

/// GET /api
async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Zione API",
        "version": API_VERSION,
    }))
}
