use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::workflows::bonus::{
    BonusCalculationMethod, BonusScheme, CalculationResult, KpiConfig, KpiIndicator,
    RealisasiInputs, DEFAULT_COST_KEYWORDS,
};

/// Identifier wrapper for divisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DivisionId(pub u64);

/// Identifier wrapper for employees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

/// Identifier wrapper for saved calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(pub u64);

impl FromStr for DivisionId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(DivisionId)
    }
}

impl FromStr for EmployeeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(EmployeeId)
    }
}

/// A business unit owning its KPI set, tier tables and bonus method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: DivisionId,
    pub name: String,
    pub bonus_calculation_method: BonusCalculationMethod,
    pub cost_keywords: Vec<String>,
}

/// Payload for creating a division. Missing fields take the service defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDivision {
    pub name: String,
    #[serde(default)]
    pub bonus_calculation_method: Option<BonusCalculationMethod>,
    #[serde(default)]
    pub cost_keywords: Option<Vec<String>>,
}

impl NewDivision {
    pub(crate) fn into_division(self, id: DivisionId) -> Division {
        Division {
            id,
            name: self.name.trim().to_string(),
            bonus_calculation_method: self.bonus_calculation_method.unwrap_or_default(),
            cost_keywords: self.cost_keywords.unwrap_or_else(|| {
                DEFAULT_COST_KEYWORDS
                    .iter()
                    .map(|keyword| keyword.to_string())
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: EmployeeId,
    pub division_id: DivisionId,
    pub name: String,
}

/// A configuration record together with the division that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionScoped<T> {
    pub division_id: DivisionId,
    #[serde(flatten)]
    pub record: T,
}

pub type DivisionKpi = DivisionScoped<KpiConfig>;
pub type DivisionScheme = DivisionScoped<BonusScheme>;
pub type DivisionIndicator = DivisionScoped<KpiIndicator>;

/// Everything the engine needs from a division's stored configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisionSetup {
    pub division: Division,
    pub kpis: Vec<KpiConfig>,
    pub schemes: Vec<BonusScheme>,
    pub indicators: Vec<KpiIndicator>,
}

/// Realisasi submitted for a stored division.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionCalculationRequest {
    #[serde(default)]
    pub realisasi_inputs: RealisasiInputs,
}

/// A saved calculation for one employee and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub division_id: DivisionId,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub date: DateTime<Utc>,
    pub period_month: String,
    pub period_year: i32,
    pub total_points: f64,
    pub bonus: f64,
    pub results: CalculationResult,
    /// Rendered statement, stored as received.
    #[serde(default)]
    pub pdf_data_uri: Option<String>,
}

impl HistoryEntry {
    pub fn period(&self) -> PeriodKey {
        PeriodKey {
            division_id: self.division_id,
            employee_id: self.employee_id,
            period_month: self.period_month.clone(),
            period_year: self.period_year,
        }
    }
}

/// At most one saved calculation exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeriodKey {
    pub division_id: DivisionId,
    pub employee_id: EmployeeId,
    pub period_month: String,
    pub period_year: i32,
}

/// Payload for saving a calculation. The division may be given by id or by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHistoryEntry {
    #[serde(default)]
    pub division_id: Option<DivisionId>,
    #[serde(default)]
    pub division_name: Option<String>,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    /// RFC 3339 timestamp; anything else falls back to the time of saving.
    #[serde(default)]
    pub date: Option<String>,
    pub period_month: String,
    pub period_year: i32,
    pub total_points: f64,
    pub bonus: f64,
    pub results: CalculationResult,
    #[serde(default)]
    pub pdf_data_uri: Option<String>,
}

/// Query-string filters for listing saved calculations. Blank values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub division_id: Option<DivisionId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub division_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub employee_id: Option<EmployeeId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub period_month: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub period_year: Option<i32>,
}

/// Filters with the division already resolved to an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub division_id: Option<DivisionId>,
    pub employee_id: Option<EmployeeId>,
    pub period_month: Option<String>,
    pub period_year: Option<i32>,
}

impl HistoryQuery {
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        self.division_id.map_or(true, |id| entry.division_id == id)
            && self.employee_id.map_or(true, |id| entry.employee_id == id)
            && self
                .period_month
                .as_deref()
                .map_or(true, |month| entry.period_month == month)
            && self.period_year.map_or(true, |year| entry.period_year == year)
    }
}

/// `?division_id=` filter shared by the configuration listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub division_id: Option<DivisionId>,
}

/// Reads a query value, treating an absent or blank parameter (`?division_id=`) as unset.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Replacement cost-keyword list for a division.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostKeywordsUpdate {
    pub keywords: Vec<String>,
}
