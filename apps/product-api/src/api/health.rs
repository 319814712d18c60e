//! Health check endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use database::postgres::DatabaseConnection;
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

fn health_response(status: &str) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        service: "product-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

async fn health() -> Json<HealthResponse> {
    Json(health_response("healthy"))
}

async fn ready(
    State(db): State<DatabaseConnection>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    match database::postgres::check_health(&db).await {
        Ok(()) => Ok(Json(health_response("ready"))),
        Err(e) => {
            tracing::error!(error = %e, "readiness check failed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(health_response("not ready")),
            ))
        }
    }
}

pub fn router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(db)
}
