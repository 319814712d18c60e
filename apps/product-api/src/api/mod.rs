//! API routes module

pub mod health;
pub mod products;

use axum::{routing::get, Json, Router};
use database::postgres::DatabaseConnection;
use serde::Serialize;

/// Welcome message served at the API root
#[derive(Serialize)]
struct WelcomeResponse {
    message: String,
}

async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Product REST API".to_string(),
    })
}

/// Create all API routes
pub fn routes(db: &DatabaseConnection) -> Router {
    Router::new()
        .route("/", get(welcome))
        .nest("/products", products::router(db))
        .merge(health::router(db.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_welcome_message() {
        let app = Router::new().route("/", get(welcome));

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"message": "Welcome to the Product REST API"})
        );
    }
}
