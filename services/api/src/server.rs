use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::{cors_layer, with_service_routes};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_scoring::config::AppConfig;
use credit_scoring::error::AppError;
use credit_scoring::telemetry;
use credit_scoring::ScoringEngine;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        service: Arc::new(config.service.clone()),
    };

    let engine = Arc::new(ScoringEngine::new(config.scoring));
    let app = with_service_routes(engine, &config.service.api_prefix)
        .layer(Extension(app_state))
        .layer(cors_layer(&config.server.cors_origins))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        cors_origins = ?config.server.cors_origins,
        name = %config.service.name,
        version = %config.service.version,
        min_score = config.scoring.min_score,
        max_score = config.scoring.max_score,
        approval_threshold = config.scoring.approval_threshold,
        review_threshold = config.scoring.review_threshold,
        "credit scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
