use crate::infra::AppState;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use credit_scoring::config::AllowedOrigins;
use credit_scoring::router::score_router;
use credit_scoring::ScoringEngine;
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Serialize)]
pub(crate) struct ServiceMetadata {
    pub(crate) name: String,
    pub(crate) version: String,
    pub(crate) status: &'static str,
}

/// Scoring route (under `api_prefix`) plus the service-level endpoints.
pub(crate) fn with_service_routes(engine: Arc<ScoringEngine>, api_prefix: &str) -> Router {
    let scoring = score_router(engine);
    let scoring = if api_prefix.is_empty() {
        scoring
    } else {
        Router::new().nest(api_prefix, scoring)
    };

    scoring
        .route("/", get(root_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

/// Cross-origin policy. Credentials are only allowed with an explicit origin
/// list since a wildcard policy cannot carry them.
pub(crate) fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    match origins {
        AllowedOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        AllowedOrigins::Exact(origins) => {
            let allowed = origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>();

            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
                .allow_credentials(true)
        }
    }
}

pub(crate) async fn root_endpoint(Extension(state): Extension<AppState>) -> Json<ServiceMetadata> {
    Json(ServiceMetadata {
        name: state.service.name.clone(),
        version: state.service.version.clone(),
        status: "running",
    })
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
