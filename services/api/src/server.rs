use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryFileRepository};
use crate::routes::with_crs_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use crs_portal::config::PortalConfig;
use crs_portal::error::AppError;
use crs_portal::immigration::{CrsScoreService, FileCategory, OwnerId};
use crs_portal::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = PortalConfig::load()?;

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
    };

    let repository = Arc::new(InMemoryFileRepository::default());
    let crs_service = Arc::new(CrsScoreService::new(repository));

    if let Some(owner) = config.demo_owner.clone() {
        let file = crs_service.open_file(OwnerId(owner), FileCategory::ExpressEntry)?;
        info!(file_number = %file.file_number, "demo immigration file ready");
    }

    let app = with_crs_routes(crs_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "crs portal api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
