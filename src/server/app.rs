use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method};
use axum::response::Response;
use axum::{extract::FromRef, http::StatusCode, routing::get, Json, Router};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quiz_router};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{ApiSettings, Settings};
use crate::selector::{Picker, ThreadRngPicker};

use super::errors::ApiError;
use super::routes;

#[derive(FromRef, Clone)]
pub struct AppState {
    pool: SqlitePool,
    picker: Arc<dyn Picker>,
    api: ApiSettings,
}

impl AppState {
    pub fn new(pool: SqlitePool, api: ApiSettings) -> Self {
        Self {
            pool,
            picker: Arc::new(ThreadRngPicker),
            api,
        }
    }

    pub fn with_picker(mut self, picker: Arc<dyn Picker>) -> Self {
        self.picker = picker;
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(category_router())
        .merge(questions_router())
        .merge(quiz_router())
        .method_not_allowed_fallback(|| async { ApiError::MethodNotAllowed })
        .fallback(|| async {
            tracing::info!("Fallback");
            ApiError::NotFound("no such route".to_owned())
        })
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

pub async fn run_server(pool: SqlitePool, settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.address();
    let app = build_router(AppState::new(pool, settings.api.clone()));
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn health() -> Json<Value> {
    Json(json!({ "success": true }))
}

async fn metrics() -> Result<Response, ApiError> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder
        .encode(&metrics, &mut buf)
        .map_err(anyhow::Error::from)?;
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(Body::from(buf))
        .map_err(|err| ApiError::Other(err.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::SqlitePool;

    use crate::server::errors::ErrorBody;
    use crate::test_utils::{create_test_app, seed_questions};

    #[sqlx::test]
    async fn health_reports_success(pool: SqlitePool) {
        let app = create_test_app(pool);
        let response = app.get("/health").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "success": true }));
    }

    #[sqlx::test]
    async fn unknown_route_uses_error_envelope(pool: SqlitePool) {
        let app = create_test_app(pool);

        let response = app.get("/nowhere").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorBody = response.json();
        assert!(!body.success);
        assert_eq!(body.error, 404);
        assert_eq!(body.message, "Not found");
    }

    #[sqlx::test]
    async fn metrics_expose_quiz_counter(pool: SqlitePool) {
        seed_questions(&pool).await;
        let app = create_test_app(pool);

        app.post("/quizzes")
            .json(&json!({ "previous_questions": [], "quiz_category": { "id": 1 } }))
            .await
            .assert_status_ok();

        let response = app.get("/metrics").await;
        response.assert_status_ok();
        assert!(response.text().contains("quiz_questions_total"));
    }

    #[sqlx::test]
    async fn cors_allows_any_origin(pool: SqlitePool) {
        let app = create_test_app(pool);

        let response = app
            .get("/categories")
            .add_header("origin", "http://localhost:3000")
            .await;
        response.assert_status_ok();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .map(|v| v.to_str().unwrap()),
            Some("*")
        );
    }
}
