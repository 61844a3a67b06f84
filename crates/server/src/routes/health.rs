use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::json;
use sqlx::PgPool;

use crate::config::Config;

/// GET /health: liveness plus a database round trip.
pub async fn health_check(Extension(pool): Extension<PgPool>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").fetch_one(&pool).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ok", "db": "ok" }))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "db": e.to_string() })),
        ),
    }
}

/// GET /api/version
pub async fn version(Extension(config): Extension<Config>) -> Json<serde_json::Value> {
    Json(json!({ "version": config.app_version }))
}
