use super::domain::{
    Division, DivisionId, DivisionIndicator, DivisionKpi, DivisionScheme, Employee, HistoryEntry,
    HistoryId, HistoryQuery, NewDivision,
};

/// Source of per-division configuration. Records are trusted as stored.
///
/// Zero ids on insert ask the store to assign the next free id.
pub trait ConfigurationStore: Send + Sync {
    fn divisions(&self) -> Result<Vec<Division>, StoreError>;
    fn division(&self, id: DivisionId) -> Result<Option<Division>, StoreError>;
    fn division_by_name(&self, name: &str) -> Result<Option<Division>, StoreError>;
    fn insert_division(&self, division: NewDivision) -> Result<Division, StoreError>;
    fn update_division(&self, division: Division) -> Result<(), StoreError>;

    fn employees(&self, division: Option<DivisionId>) -> Result<Vec<Employee>, StoreError>;
    fn insert_employee(&self, employee: Employee) -> Result<Employee, StoreError>;

    fn kpis(&self, division: Option<DivisionId>) -> Result<Vec<DivisionKpi>, StoreError>;
    fn insert_kpi(&self, kpi: DivisionKpi) -> Result<DivisionKpi, StoreError>;

    fn schemes(&self, division: Option<DivisionId>) -> Result<Vec<DivisionScheme>, StoreError>;
    fn insert_scheme(&self, scheme: DivisionScheme) -> Result<DivisionScheme, StoreError>;

    fn indicators(
        &self,
        division: Option<DivisionId>,
    ) -> Result<Vec<DivisionIndicator>, StoreError>;
    fn insert_indicator(
        &self,
        indicator: DivisionIndicator,
    ) -> Result<DivisionIndicator, StoreError>;
}

/// Saved calculations. The store assigns ids and rejects a second entry for the same
/// division, employee and period with [`StoreError::Conflict`].
pub trait HistoryStore: Send + Sync {
    fn insert(&self, entry: HistoryEntry) -> Result<HistoryEntry, StoreError>;
    /// Matching entries, newest first.
    fn list(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>, StoreError>;
    fn delete(&self, id: HistoryId) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
