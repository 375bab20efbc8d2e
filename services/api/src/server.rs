use crate::cli::ServeArgs;
use crate::infra::{build_scorer, AppState};
use crate::routes::{with_http_layers, with_review_routes};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use review_guard::assessment::ReviewAssessmentService;
use review_guard::config::AppConfig;
use review_guard::error::AppError;
use review_guard::telemetry;
use std::sync::atomic::Ordering;
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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let scorer = build_scorer(&config.review)?;
    let service = Arc::new(ReviewAssessmentService::new(
        scorer,
        config.review.intake_policy(),
    ));

    let app = with_http_layers(with_review_routes(service))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_review_length = config.review.max_review_length,
        "review assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
