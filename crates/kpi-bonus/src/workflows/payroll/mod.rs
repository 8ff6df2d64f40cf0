//! Division configuration, payroll calculation and saved calculation history.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CostKeywordsUpdate, Division, DivisionCalculationRequest, DivisionFilter, DivisionId,
    DivisionIndicator, DivisionKpi, DivisionScheme, DivisionScoped, DivisionSetup, Employee,
    EmployeeId, HistoryEntry, HistoryFilter, HistoryId, HistoryQuery, NewDivision,
    NewHistoryEntry, PeriodKey,
};
pub use memory::{InMemoryConfigurationStore, InMemoryHistoryStore};
pub use repository::{ConfigurationStore, HistoryStore, StoreError};
pub use router::payroll_router;
pub use seed::{demo_divisions, seed_store, DivisionSeed, SeedSummary};
pub use service::{PayrollService, PayrollServiceError};
