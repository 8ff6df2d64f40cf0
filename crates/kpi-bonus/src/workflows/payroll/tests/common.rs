use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::bonus::{
    BonusScheme, CalculationResult, KpiConfig, KpiDirection, KpiId, PointCapping, TierId,
    TierMatch,
};
use crate::workflows::payroll::domain::{
    DivisionId, EmployeeId, HistoryEntry, HistoryId, HistoryQuery, NewHistoryEntry,
};
use crate::workflows::payroll::memory::{InMemoryConfigurationStore, InMemoryHistoryStore};
use crate::workflows::payroll::repository::{HistoryStore, StoreError};
use crate::workflows::payroll::seed::seed_store;
use crate::workflows::payroll::service::PayrollService;

pub(super) type MemoryService = PayrollService<InMemoryConfigurationStore, InMemoryHistoryStore>;

pub(super) fn build_service() -> (
    MemoryService,
    Arc<InMemoryConfigurationStore>,
    Arc<InMemoryHistoryStore>,
) {
    let config = Arc::new(InMemoryConfigurationStore::default());
    let history = Arc::new(InMemoryHistoryStore::default());
    let service = PayrollService::new(config.clone(), history.clone());
    (service, config, history)
}

/// Service over a store holding the four demo divisions.
pub(super) fn seeded_service() -> MemoryService {
    let (service, config, _) = build_service();
    seed_store(config.as_ref()).expect("demo seed loads");
    service
}

pub(super) fn division_id(service: &MemoryService, name: &str) -> DivisionId {
    service
        .divisions()
        .expect("divisions load")
        .into_iter()
        .find(|division| division.name == name)
        .map(|division| division.id)
        .expect("division seeded")
}

pub(super) fn kpi(id: u64, platform: &str, name: &str, bobot: f64, target: f64) -> KpiConfig {
    KpiConfig {
        id: KpiId(id),
        platform: platform.to_string(),
        name: name.to_string(),
        bobot,
        target,
        min_target: None,
        kpi_type: KpiDirection::HigherIsBetter,
        is_currency: false,
        is_percentage: false,
        special_calc: None,
        point_capping: PointCapping::Uncapped,
    }
}

pub(super) fn scheme(id: u64, name: &str, threshold: f64, multiplier: f64) -> BonusScheme {
    BonusScheme {
        id: TierId(id),
        name: name.to_string(),
        threshold,
        multiplier,
    }
}

pub(super) fn empty_result() -> CalculationResult {
    CalculationResult {
        grand_total_poin: 0.0,
        final_bonus: 0.0,
        active_multiplier: 0.0,
        kpi_indicator: TierMatch::Unmatched,
        omset_indicator: TierMatch::Unmatched,
        total_omset_realisasi: 0.0,
        total_omset_target: 0.0,
        details: Vec::new(),
    }
}

pub(super) fn history_request(
    division_id: Option<DivisionId>,
    division_name: Option<&str>,
    employee_id: u64,
    period_month: &str,
    period_year: i32,
) -> NewHistoryEntry {
    NewHistoryEntry {
        division_id,
        division_name: division_name.map(str::to_string),
        employee_id: EmployeeId(employee_id),
        employee_name: format!("employee {employee_id}"),
        date: Some("2025-10-01T08:30:00Z".to_string()),
        period_month: period_month.to_string(),
        period_year,
        total_points: 87.5,
        bonus: 1_137_500.0,
        results: empty_result(),
        pdf_data_uri: None,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}

/// History store whose backing storage is gone.
pub(super) struct UnavailableHistory;

impl HistoryStore for UnavailableHistory {
    fn insert(&self, _entry: HistoryEntry) -> Result<HistoryEntry, StoreError> {
        Err(StoreError::Unavailable("history offline".to_string()))
    }

    fn list(&self, _query: &HistoryQuery) -> Result<Vec<HistoryEntry>, StoreError> {
        Err(StoreError::Unavailable("history offline".to_string()))
    }

    fn delete(&self, _id: HistoryId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("history offline".to_string()))
    }
}
