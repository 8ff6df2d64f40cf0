//! KPI scoring and tiered bonus calculation.
//!
//! Realisasi strings are normalized, ROAS is derived per platform from its revenue and
//! cost KPIs, every KPI is scored against its target, and the totals select an indicator
//! tier and (depending on the division's method) a bonus-scheme tier. Each call is a pure
//! function of its inputs.

pub mod domain;
pub mod import;
pub mod keywords;
pub mod normalizer;
pub mod report;
pub(crate) mod resolver;
pub(crate) mod scoring;
pub(crate) mod tiers;

#[cfg(test)]
mod tests;

pub use domain::{
    BonusCalculationMethod, BonusScheme, CalculationRequest, CalculationResult, KpiConfig,
    KpiDirection, KpiId, KpiIndicator, KpiResultDetail, PointCapping, RealisasiInputs,
    SpecialCalculation, Tier, TierId, TierMatch, UNMATCHED_TIER_NAME,
};
pub use import::{RealisasiImportError, RealisasiImporter};
pub use keywords::{CostKeywords, DEFAULT_COST_KEYWORDS};
pub use normalizer::{normalize_realisasi, parse_plain, parse_rupiah};
pub use report::{format_rupiah, write_report};

use tracing::debug;

/// Rupiah paid per point at a multiplier of one.
pub const BONUS_UNIT: f64 = 1000.0;

/// Stateless calculator bound to one division's cost-keyword set.
#[derive(Debug, Clone, Default)]
pub struct BonusEngine {
    keywords: CostKeywords,
}

impl BonusEngine {
    pub fn new(keywords: CostKeywords) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &CostKeywords {
        &self.keywords
    }

    pub fn calculate(
        &self,
        kpi_configs: &[KpiConfig],
        bonus_schemes: &[BonusScheme],
        kpi_indicators: &[KpiIndicator],
        realisasi_inputs: &RealisasiInputs,
        method: BonusCalculationMethod,
    ) -> CalculationResult {
        let derived = resolver::resolve_roas(kpi_configs, realisasi_inputs, &self.keywords);
        let sheet = scoring::score_kpis(kpi_configs, realisasi_inputs, &derived, &self.keywords);

        let kpi_indicator = tiers::select_tier(kpi_indicators, sheet.grand_total_poin);

        let (omset_indicator, active_multiplier) = match method {
            BonusCalculationMethod::NonSales => (TierMatch::Unmatched, 0.0),
            BonusCalculationMethod::OmsetBased | BonusCalculationMethod::PointsBased => {
                let source = if method == BonusCalculationMethod::PointsBased {
                    sheet.grand_total_poin
                } else {
                    sheet.total_omset_realisasi
                };
                let scheme = tiers::select_tier(bonus_schemes, source);
                let multiplier = scheme.matched().map(|tier| tier.multiplier).unwrap_or(0.0);
                (scheme, multiplier)
            }
        };

        let final_bonus = sheet.grand_total_poin * BONUS_UNIT * active_multiplier;

        debug!(
            method = method.label(),
            grand_total_poin = sheet.grand_total_poin,
            indicator = kpi_indicator.name(),
            scheme = omset_indicator.name(),
            final_bonus,
            "bonus calculated"
        );

        CalculationResult {
            grand_total_poin: sheet.grand_total_poin,
            final_bonus,
            active_multiplier,
            kpi_indicator,
            omset_indicator,
            total_omset_realisasi: sheet.total_omset_realisasi,
            total_omset_target: sheet.total_omset_target,
            details: sheet.details,
        }
    }
}

/// Runs one calculation from a transport-level request.
pub fn calculate(request: &CalculationRequest) -> CalculationResult {
    BonusEngine::new(CostKeywords::from_custom(&request.custom_cost_keywords)).calculate(
        &request.kpi_configs,
        &request.bonus_schemes,
        &request.kpi_indicators,
        &request.realisasi_inputs,
        request.bonus_calculation_method,
    )
}
