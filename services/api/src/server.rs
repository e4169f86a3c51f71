use crate::cli::ServeArgs;
use crate::infra::{claim_review_service, AppState, InMemoryEventStore};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rainguard::config::AppConfig;
use rainguard::error::AppError;
use rainguard::telemetry;
use rainguard::ticketing::TicketingService;
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

    let store = Arc::new(InMemoryEventStore::default());
    let ticketing = Arc::new(TicketingService::new(store));
    let claims = Arc::new(claim_review_service(&config.weather, &config.summary)?);

    let app = with_service_routes(ticketing, claims)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        ai_summaries = config.summary.enabled(),
        "rainguard ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
