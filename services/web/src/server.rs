use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_catalog_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use entitlemate::config::AppConfig;
use entitlemate::error::AppError;
use entitlemate::loader::{CatalogSource, EntitlementSource};
use entitlemate::service::CatalogService;
use entitlemate::telemetry;
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

    let source = CatalogSource::select(&config.source, args.source.csv, args.source.json)?;
    let source_label = source.describe();
    let catalog = Arc::new(CatalogService::new(source));

    let app = with_catalog_routes(catalog.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // The page shows its loading state until the first fetch settles.
    let initial_flag = readiness_flag.clone();
    tokio::spawn(async move {
        catalog.reload().await;
        initial_flag.store(true, Ordering::Release);
    });

    info!(?config.environment, %addr, source = %source_label, "entitlement catalog listening");

    axum::serve(listener, app).await?;
    Ok(())
}
