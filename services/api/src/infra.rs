use chrono::NaiveDate;
use clap::ValueEnum;
use kpi_bonus::error::AppError;
use kpi_bonus::workflows::payroll::{
    seed_store, InMemoryConfigurationStore, InMemoryHistoryStore, PayrollService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

pub(crate) type MemoryPayrollService =
    PayrollService<InMemoryConfigurationStore, InMemoryHistoryStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the process-local payroll service, optionally loaded with the demo divisions.
pub(crate) fn build_service(seed_demo: bool) -> Result<Arc<MemoryPayrollService>, AppError> {
    let config = Arc::new(InMemoryConfigurationStore::default());
    if seed_demo {
        let summary = seed_store(config.as_ref())?;
        info!(
            divisions = summary.divisions,
            employees = summary.employees,
            kpis = summary.kpis,
            "demo configuration loaded"
        );
    }

    let history = Arc::new(InMemoryHistoryStore::default());
    Ok(Arc::new(PayrollService::new(config, history)))
}

/// Output rendering for CLI calculations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

/// Parses a `YYYY-MM` payroll period into the first day of that month.
pub(crate) fn parse_period(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM ({err})"))
}
