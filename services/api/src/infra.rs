use metrics_exporter_prometheus::PrometheusHandle;
use milecalc::config::EarningConfig;
use milecalc::earning::{InMemoryCatalog, MileageEngine};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type StandardEngine = MileageEngine<InMemoryCatalog>;

/// Engine over the compiled-in reference catalog.
pub(crate) fn standard_engine(config: &EarningConfig) -> Arc<StandardEngine> {
    let catalog = Arc::new(InMemoryCatalog::standard());
    Arc::new(MileageEngine::with_config(catalog, config))
}
