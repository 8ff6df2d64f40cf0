use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier for a configured KPI. Used as the key of submitted realisasi values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KpiId(pub u64);

/// Identifier for a bonus scheme or indicator tier. Unique within a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierId(pub u64);

/// Raw realized values keyed by KPI. Values are free-form strings as typed by an operator.
pub type RealisasiInputs = BTreeMap<KpiId, String>;

/// Whether a larger realized value counts as better performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiDirection {
    #[default]
    HigherIsBetter,
    LowerIsBetter,
}

/// Limits a KPI's point contribution to its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointCapping {
    #[default]
    Uncapped,
    Capped,
}

/// KPIs whose realized value is derived from sibling KPIs instead of submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialCalculation {
    #[serde(rename = "ROAS")]
    Roas,
}

/// Which value a division's bonus schemes are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BonusCalculationMethod {
    /// Schemes are matched against total realized revenue.
    #[default]
    OmsetBased,
    /// Schemes are matched against the grand total of points.
    PointsBased,
    /// No bonus; only the KPI indicator is reported.
    NonSales,
}

impl BonusCalculationMethod {
    pub fn label(&self) -> &'static str {
        match self {
            BonusCalculationMethod::OmsetBased => "OMSET_BASED",
            BonusCalculationMethod::PointsBased => "POINTS_BASED",
            BonusCalculationMethod::NonSales => "NON_SALES",
        }
    }
}

/// A KPI definition for one division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiConfig {
    #[serde(default)]
    pub id: KpiId,
    pub platform: String,
    pub name: String,
    pub bobot: f64,
    pub target: f64,
    #[serde(default)]
    pub min_target: Option<f64>,
    #[serde(rename = "type", default)]
    pub kpi_type: KpiDirection,
    #[serde(default)]
    pub is_currency: bool,
    #[serde(default)]
    pub is_percentage: bool,
    #[serde(default)]
    pub special_calc: Option<SpecialCalculation>,
    #[serde(default)]
    pub point_capping: PointCapping,
}

impl KpiConfig {
    pub fn is_roas(&self) -> bool {
        self.special_calc == Some(SpecialCalculation::Roas)
    }
}

/// One step of a division's bonus multiplier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusScheme {
    #[serde(default)]
    pub id: TierId,
    pub name: String,
    pub threshold: f64,
    pub multiplier: f64,
}

/// Qualitative performance band selected from the grand total of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiIndicator {
    #[serde(default)]
    pub id: TierId,
    pub name: String,
    pub threshold: f64,
    pub color: String,
}

/// Threshold-ordered tier tables share the same first-match lookup.
pub trait Tier: Clone {
    /// Color reported alongside the "N/A" sentinel, if the tier kind carries one.
    const UNMATCHED_COLOR: Option<&'static str>;

    fn threshold(&self) -> f64;

    fn name(&self) -> &str;
}

impl Tier for BonusScheme {
    const UNMATCHED_COLOR: Option<&'static str> = None;

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Tier for KpiIndicator {
    const UNMATCHED_COLOR: Option<&'static str> = Some("bg-slate-400");

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Name reported when no tier qualifies.
pub const UNMATCHED_TIER_NAME: &str = "N/A";

/// Outcome of a tier lookup.
///
/// On the wire an unmatched tier keeps the `{"name": "N/A"}` shape existing clients expect.
#[derive(Debug, Clone, PartialEq)]
pub enum TierMatch<T> {
    Matched(T),
    Unmatched,
}

impl<T> TierMatch<T> {
    pub fn matched(&self) -> Option<&T> {
        match self {
            TierMatch::Matched(tier) => Some(tier),
            TierMatch::Unmatched => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, TierMatch::Matched(_))
    }
}

impl<T: Tier> TierMatch<T> {
    pub fn name(&self) -> &str {
        self.matched().map(Tier::name).unwrap_or(UNMATCHED_TIER_NAME)
    }
}

impl<T: Tier + Serialize> Serialize for TierMatch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TierMatch::Matched(tier) => tier.serialize(serializer),
            TierMatch::Unmatched => {
                let len = 1 + usize::from(T::UNMATCHED_COLOR.is_some());
                let mut state = serializer.serialize_struct("UnmatchedTier", len)?;
                state.serialize_field("name", UNMATCHED_TIER_NAME)?;
                if let Some(color) = T::UNMATCHED_COLOR {
                    state.serialize_field("color", color)?;
                }
                state.end()
            }
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for TierMatch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Matched(T),
            Unmatched {
                #[allow(dead_code)]
                name: String,
            },
        }

        Ok(match Repr::<T>::deserialize(deserializer)? {
            Repr::Matched(tier) => TierMatch::Matched(tier),
            Repr::Unmatched { .. } => TierMatch::Unmatched,
        })
    }
}

/// Per-KPI line of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiResultDetail {
    pub id: KpiId,
    pub score: f64,
    pub poin: f64,
    pub realisasi: f64,
}

/// Output of one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub grand_total_poin: f64,
    pub final_bonus: f64,
    pub active_multiplier: f64,
    pub kpi_indicator: TierMatch<KpiIndicator>,
    pub omset_indicator: TierMatch<BonusScheme>,
    pub total_omset_realisasi: f64,
    pub total_omset_target: f64,
    pub details: Vec<KpiResultDetail>,
}

impl CalculationResult {
    pub fn detail(&self, id: KpiId) -> Option<&KpiResultDetail> {
        self.details.iter().find(|detail| detail.id == id)
    }
}

/// Everything the engine needs for one calculation, as received over the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(default)]
    pub kpi_configs: Vec<KpiConfig>,
    #[serde(default)]
    pub bonus_schemes: Vec<BonusScheme>,
    #[serde(default)]
    pub kpi_indicators: Vec<KpiIndicator>,
    #[serde(default)]
    pub realisasi_inputs: RealisasiInputs,
    #[serde(default)]
    pub bonus_calculation_method: BonusCalculationMethod,
    #[serde(default)]
    pub custom_cost_keywords: Vec<String>,
}
