use boothops::config::AppConfig;
use boothops::executives::DecisionDispatcher;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Dispatcher configured from the loaded executive policy.
///
/// No language model client ships with the service, so model-backed decisions stay off even
/// when requested.
pub(crate) fn build_dispatcher(config: &AppConfig) -> DecisionDispatcher {
    if config.model_decisions {
        warn!("APP_MODEL_DECISIONS is set but no language model client is registered; using rule-based decisions");
    }
    DecisionDispatcher::new(config.executives.clone())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
