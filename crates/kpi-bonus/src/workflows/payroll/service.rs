use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{
    Division, DivisionId, DivisionIndicator, DivisionKpi, DivisionScheme, DivisionSetup,
    Employee, EmployeeId, HistoryEntry, HistoryFilter, HistoryId, HistoryQuery, NewDivision,
    NewHistoryEntry,
};
use super::repository::{ConfigurationStore, HistoryStore, StoreError};
use crate::workflows::bonus::{BonusEngine, CalculationResult, CostKeywords, RealisasiInputs};

/// Service composing the configuration store, history store and bonus engine.
pub struct PayrollService<C, H> {
    config: Arc<C>,
    history: Arc<H>,
}

impl<C, H> PayrollService<C, H>
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    pub fn new(config: Arc<C>, history: Arc<H>) -> Self {
        Self { config, history }
    }

    pub fn configuration(&self) -> &C {
        &self.config
    }

    pub fn divisions(&self) -> Result<Vec<Division>, PayrollServiceError> {
        Ok(self.config.divisions()?)
    }

    /// Method defaults to `OMSET_BASED` and cost keywords to the built-in list.
    pub fn create_division(&self, division: NewDivision) -> Result<Division, PayrollServiceError> {
        if division.name.trim().is_empty() {
            return Err(PayrollServiceError::InvalidDivisionName);
        }
        let created = self.config.insert_division(division).map_err(|err| match err {
            StoreError::Conflict => PayrollServiceError::DuplicateDivision,
            other => other.into(),
        })?;
        info!(division = %created.name, id = created.id.0, "division created");
        Ok(created)
    }

    /// Replaces a division's cost keywords verbatim; cleaning happens at calculation time.
    pub fn set_cost_keywords(
        &self,
        id: DivisionId,
        keywords: Vec<String>,
    ) -> Result<Division, PayrollServiceError> {
        let mut division = self.division(id)?;
        division.cost_keywords = keywords;
        self.config.update_division(division.clone())?;
        Ok(division)
    }

    pub fn employees(
        &self,
        division: Option<DivisionId>,
    ) -> Result<Vec<Employee>, PayrollServiceError> {
        Ok(self.config.employees(division)?)
    }

    pub fn create_employee(&self, employee: Employee) -> Result<Employee, PayrollServiceError> {
        self.division(employee.division_id)?;
        Ok(self.config.insert_employee(employee)?)
    }

    pub fn kpis(&self, division: Option<DivisionId>) -> Result<Vec<DivisionKpi>, PayrollServiceError> {
        Ok(self.config.kpis(division)?)
    }

    pub fn create_kpi(&self, kpi: DivisionKpi) -> Result<DivisionKpi, PayrollServiceError> {
        self.division(kpi.division_id)?;
        Ok(self.config.insert_kpi(kpi)?)
    }

    pub fn schemes(
        &self,
        division: Option<DivisionId>,
    ) -> Result<Vec<DivisionScheme>, PayrollServiceError> {
        Ok(self.config.schemes(division)?)
    }

    pub fn create_scheme(
        &self,
        scheme: DivisionScheme,
    ) -> Result<DivisionScheme, PayrollServiceError> {
        self.division(scheme.division_id)?;
        Ok(self.config.insert_scheme(scheme)?)
    }

    pub fn indicators(
        &self,
        division: Option<DivisionId>,
    ) -> Result<Vec<DivisionIndicator>, PayrollServiceError> {
        Ok(self.config.indicators(division)?)
    }

    pub fn create_indicator(
        &self,
        indicator: DivisionIndicator,
    ) -> Result<DivisionIndicator, PayrollServiceError> {
        self.division(indicator.division_id)?;
        Ok(self.config.insert_indicator(indicator)?)
    }

    /// Loads a division together with its KPI set and tier tables, in stored order.
    pub fn setup(&self, id: DivisionId) -> Result<DivisionSetup, PayrollServiceError> {
        let division = self.division(id)?;
        let kpis = self
            .config
            .kpis(Some(id))?
            .into_iter()
            .map(|scoped| scoped.record)
            .collect();
        let schemes = self
            .config
            .schemes(Some(id))?
            .into_iter()
            .map(|scoped| scoped.record)
            .collect();
        let indicators = self
            .config
            .indicators(Some(id))?
            .into_iter()
            .map(|scoped| scoped.record)
            .collect();

        Ok(DivisionSetup {
            division,
            kpis,
            schemes,
            indicators,
        })
    }

    /// Runs the engine over a stored division's configuration.
    pub fn calculate_for_division(
        &self,
        id: DivisionId,
        realisasi: &RealisasiInputs,
    ) -> Result<CalculationResult, PayrollServiceError> {
        let setup = self.setup(id)?;
        let engine = BonusEngine::new(CostKeywords::from_custom(&setup.division.cost_keywords));
        Ok(engine.calculate(
            &setup.kpis,
            &setup.schemes,
            &setup.indicators,
            realisasi,
            setup.division.bonus_calculation_method,
        ))
    }

    /// Saves a calculation. The division is taken from the id, or looked up by name when
    /// the id is absent or zero.
    pub fn record_history(
        &self,
        request: NewHistoryEntry,
    ) -> Result<HistoryEntry, PayrollServiceError> {
        let division_id = self.resolve_history_division(&request)?;
        let known_employee = self
            .config
            .employees(Some(division_id))?
            .iter()
            .any(|employee| employee.id == request.employee_id);
        if !known_employee {
            return Err(PayrollServiceError::UnknownEmployee(request.employee_id));
        }
        let date = request
            .date
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
            .map(|parsed| parsed.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        let entry = HistoryEntry {
            id: HistoryId(0),
            division_id,
            employee_id: request.employee_id,
            employee_name: request.employee_name,
            date,
            period_month: request.period_month,
            period_year: request.period_year,
            total_points: request.total_points,
            bonus: request.bonus,
            results: request.results,
            pdf_data_uri: request.pdf_data_uri,
        };

        match self.history.insert(entry) {
            Ok(saved) => {
                info!(
                    history_id = saved.id.0,
                    division_id = saved.division_id.0,
                    employee_id = saved.employee_id.0,
                    period = %format!("{} {}", saved.period_month, saved.period_year),
                    "calculation recorded"
                );
                Ok(saved)
            }
            Err(StoreError::Conflict) => {
                warn!(
                    division_id = division_id.0,
                    "history already recorded for employee and period"
                );
                Err(PayrollServiceError::DuplicateHistory)
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Saved calculations, newest first. An unknown division name matches nothing.
    pub fn history(&self, filter: HistoryFilter) -> Result<Vec<HistoryEntry>, PayrollServiceError> {
        let mut division_id = filter.division_id;
        if let Some(name) = filter
            .division_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            match self.config.division_by_name(name)? {
                Some(division) => {
                    if division_id.is_some_and(|id| id != division.id) {
                        return Ok(Vec::new());
                    }
                    division_id = Some(division.id);
                }
                None => return Ok(Vec::new()),
            }
        }

        let query = HistoryQuery {
            division_id,
            employee_id: filter.employee_id,
            period_month: filter.period_month,
            period_year: filter.period_year,
        };
        Ok(self.history.list(&query)?)
    }

    pub fn delete_history(&self, id: HistoryId) -> Result<(), PayrollServiceError> {
        self.history.delete(id).map_err(|err| match err {
            StoreError::NotFound => PayrollServiceError::UnknownHistory(id),
            other => other.into(),
        })
    }

    fn division(&self, id: DivisionId) -> Result<Division, PayrollServiceError> {
        self.config
            .division(id)?
            .ok_or(PayrollServiceError::UnknownDivision(id))
    }

    fn resolve_history_division(
        &self,
        request: &NewHistoryEntry,
    ) -> Result<DivisionId, PayrollServiceError> {
        if let Some(id) = request.division_id.filter(|id| id.0 != 0) {
            return self.division(id).map(|division| division.id);
        }

        let name = request
            .division_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(PayrollServiceError::MissingDivision)?;

        self.config
            .division_by_name(name)?
            .map(|division| division.id)
            .ok_or(PayrollServiceError::MissingDivision)
    }
}

/// Error raised by the payroll service.
#[derive(Debug, thiserror::Error)]
pub enum PayrollServiceError {
    #[error("division {} not found", .0 .0)]
    UnknownDivision(DivisionId),
    #[error("employee {} not found in division", .0 .0)]
    UnknownEmployee(EmployeeId),
    #[error("history entry {} not found", .0 .0)]
    UnknownHistory(HistoryId),
    #[error("divisionId or valid divisionName is required")]
    MissingDivision,
    #[error("division name must not be empty")]
    InvalidDivisionName,
    #[error("division already exists")]
    DuplicateDivision,
    #[error("duplicate history for employee and period")]
    DuplicateHistory,
    #[error(transparent)]
    Store(#[from] StoreError),
}
