use crate::cli::SourceArgs;
use entitlemate::config::AppConfig;
use entitlemate::error::AppError;
use entitlemate::loader::{CatalogSource, EntitlementSource};
use entitlemate::session::CatalogState;
use entitlemate::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One-shot load for the terminal commands. Unlike the web page, a failed
/// fetch ends the command with the loader's error.
pub(crate) async fn load_catalog(args: &SourceArgs) -> Result<CatalogState, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let source = CatalogSource::select(&config.source, args.csv.clone(), args.json.clone())?;
    let mut state = CatalogState::new();
    let generation = state.begin_load();
    let records = source.fetch().await?;
    state.complete_load(generation, Ok(records));
    Ok(state)
}
