use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{
    Division, DivisionId, DivisionIndicator, DivisionKpi, DivisionScheme, DivisionScoped,
    Employee, EmployeeId, HistoryEntry, HistoryId, HistoryQuery, NewDivision,
};
use super::repository::{ConfigurationStore, HistoryStore, StoreError};
use crate::workflows::bonus::{KpiId, TierId};

#[derive(Debug, Default)]
struct ConfigTables {
    divisions: Vec<Division>,
    employees: Vec<Employee>,
    kpis: Vec<DivisionKpi>,
    schemes: Vec<DivisionScheme>,
    indicators: Vec<DivisionIndicator>,
}

/// Process-local configuration store. Listings keep insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryConfigurationStore {
    tables: Arc<Mutex<ConfigTables>>,
}

impl InMemoryConfigurationStore {
    fn tables(&self) -> Result<MutexGuard<'_, ConfigTables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("configuration mutex poisoned".to_string()))
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

fn scoped<T: Clone>(
    records: &[DivisionScoped<T>],
    division: Option<DivisionId>,
) -> Vec<DivisionScoped<T>> {
    records
        .iter()
        .filter(|record| division.map_or(true, |id| record.division_id == id))
        .cloned()
        .collect()
}

impl ConfigurationStore for InMemoryConfigurationStore {
    fn divisions(&self) -> Result<Vec<Division>, StoreError> {
        Ok(self.tables()?.divisions.clone())
    }

    fn division(&self, id: DivisionId) -> Result<Option<Division>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .divisions
            .iter()
            .find(|division| division.id == id)
            .cloned())
    }

    fn division_by_name(&self, name: &str) -> Result<Option<Division>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .divisions
            .iter()
            .find(|division| division.name == name)
            .cloned())
    }

    fn insert_division(&self, division: NewDivision) -> Result<Division, StoreError> {
        let mut tables = self.tables()?;
        let name = division.name.trim();
        if tables.divisions.iter().any(|existing| existing.name == name) {
            return Err(StoreError::Conflict);
        }

        let id = DivisionId(next_id(tables.divisions.iter().map(|d| d.id.0)));
        let division = division.into_division(id);
        tables.divisions.push(division.clone());
        Ok(division)
    }

    fn update_division(&self, division: Division) -> Result<(), StoreError> {
        let mut tables = self.tables()?;
        match tables
            .divisions
            .iter_mut()
            .find(|existing| existing.id == division.id)
        {
            Some(existing) => {
                *existing = division;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn employees(&self, division: Option<DivisionId>) -> Result<Vec<Employee>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .employees
            .iter()
            .filter(|employee| division.map_or(true, |id| employee.division_id == id))
            .cloned()
            .collect())
    }

    fn insert_employee(&self, mut employee: Employee) -> Result<Employee, StoreError> {
        let mut tables = self.tables()?;
        if employee.id == EmployeeId(0) {
            employee.id = EmployeeId(next_id(tables.employees.iter().map(|e| e.id.0)));
        } else if tables.employees.iter().any(|existing| existing.id == employee.id) {
            return Err(StoreError::Conflict);
        }
        tables.employees.push(employee.clone());
        Ok(employee)
    }

    fn kpis(&self, division: Option<DivisionId>) -> Result<Vec<DivisionKpi>, StoreError> {
        Ok(scoped(&self.tables()?.kpis, division))
    }

    fn insert_kpi(&self, mut kpi: DivisionKpi) -> Result<DivisionKpi, StoreError> {
        let mut tables = self.tables()?;
        if kpi.record.id == KpiId(0) {
            kpi.record.id = KpiId(next_id(tables.kpis.iter().map(|k| k.record.id.0)));
        } else if tables
            .kpis
            .iter()
            .any(|existing| existing.record.id == kpi.record.id)
        {
            return Err(StoreError::Conflict);
        }
        tables.kpis.push(kpi.clone());
        Ok(kpi)
    }

    fn schemes(&self, division: Option<DivisionId>) -> Result<Vec<DivisionScheme>, StoreError> {
        Ok(scoped(&self.tables()?.schemes, division))
    }

    fn insert_scheme(&self, mut scheme: DivisionScheme) -> Result<DivisionScheme, StoreError> {
        let mut tables = self.tables()?;
        let division_id = scheme.division_id;
        let siblings = tables
            .schemes
            .iter()
            .filter(|existing| existing.division_id == division_id);
        if scheme.record.id == TierId(0) {
            scheme.record.id = TierId(next_id(siblings.map(|s| s.record.id.0)));
        } else if siblings
            .clone()
            .any(|existing| existing.record.id == scheme.record.id)
        {
            return Err(StoreError::Conflict);
        }
        tables.schemes.push(scheme.clone());
        Ok(scheme)
    }

    fn indicators(
        &self,
        division: Option<DivisionId>,
    ) -> Result<Vec<DivisionIndicator>, StoreError> {
        Ok(scoped(&self.tables()?.indicators, division))
    }

    fn insert_indicator(
        &self,
        mut indicator: DivisionIndicator,
    ) -> Result<DivisionIndicator, StoreError> {
        let mut tables = self.tables()?;
        let division_id = indicator.division_id;
        let siblings = tables
            .indicators
            .iter()
            .filter(|existing| existing.division_id == division_id);
        if indicator.record.id == TierId(0) {
            indicator.record.id = TierId(next_id(siblings.map(|i| i.record.id.0)));
        } else if siblings
            .clone()
            .any(|existing| existing.record.id == indicator.record.id)
        {
            return Err(StoreError::Conflict);
        }
        tables.indicators.push(indicator.clone());
        Ok(indicator)
    }
}

#[derive(Debug, Default)]
struct HistoryTable {
    entries: Vec<HistoryEntry>,
    last_id: u64,
}

/// Process-local history store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryHistoryStore {
    table: Arc<Mutex<HistoryTable>>,
}

impl InMemoryHistoryStore {
    fn table(&self) -> Result<MutexGuard<'_, HistoryTable>, StoreError> {
        self.table
            .lock()
            .map_err(|_| StoreError::Unavailable("history mutex poisoned".to_string()))
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn insert(&self, mut entry: HistoryEntry) -> Result<HistoryEntry, StoreError> {
        let mut table = self.table()?;
        let period = entry.period();
        if table.entries.iter().any(|existing| existing.period() == period) {
            return Err(StoreError::Conflict);
        }

        table.last_id += 1;
        entry.id = HistoryId(table.last_id);
        table.entries.push(entry.clone());
        Ok(entry)
    }

    fn list(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>, StoreError> {
        let table = self.table()?;
        let mut entries: Vec<HistoryEntry> = table
            .entries
            .iter()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(entries)
    }

    fn delete(&self, id: HistoryId) -> Result<(), StoreError> {
        let mut table = self.table()?;
        let before = table.entries.len();
        table.entries.retain(|entry| entry.id != id);
        if table.entries.len() == before {
            Err(StoreError::NotFound)
        } else {
            Ok(())
        }
    }
}
