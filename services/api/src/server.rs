use crate::cli::ServeArgs;
use crate::infra::{load_rule_set, AppState};
use crate::routes::with_scholarship_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scholarship_rules::config::AppConfig;
use scholarship_rules::error::AppError;
use scholarship_rules::telemetry;
use scholarship_rules::workflows::scholarship::RuleSetRegistry;
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
    if let Some(path) = args.source.rules.take() {
        config.rules.path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let rules = load_rule_set(config.rules.path.as_deref())?;
    let registry = Arc::new(RuleSetRegistry::new(rules));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_scholarship_routes(registry)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scholarship screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
