use std::collections::HashMap;

use super::domain::{KpiConfig, KpiDirection, KpiId, KpiResultDetail, PointCapping, RealisasiInputs};
use super::keywords::CostKeywords;
use super::normalizer::normalize_realisasi;

/// Denominator floor for lower-is-better ratios.
pub(crate) const RATIO_EPSILON: f64 = 1e-9;

/// Totals accumulated while scoring a KPI set.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ScoreSheet {
    pub grand_total_poin: f64,
    pub total_omset_realisasi: f64,
    pub total_omset_target: f64,
    pub details: Vec<KpiResultDetail>,
}

pub(crate) fn score_kpis(
    kpis: &[KpiConfig],
    inputs: &RealisasiInputs,
    derived_roas: &HashMap<KpiId, f64>,
    keywords: &CostKeywords,
) -> ScoreSheet {
    let mut sheet = ScoreSheet {
        details: Vec::with_capacity(kpis.len()),
        ..ScoreSheet::default()
    };

    for kpi in kpis {
        let realisasi = if kpi.is_roas() {
            derived_roas.get(&kpi.id).copied().unwrap_or(0.0)
        } else {
            let raw = inputs.get(&kpi.id).map(String::as_str).unwrap_or("0");
            normalize_realisasi(raw, kpi.is_currency)
        };

        if kpi.is_currency && !keywords.is_cost(&kpi.name) {
            sheet.total_omset_realisasi += realisasi;
            sheet.total_omset_target += kpi.target;
        }

        let ratio = achievement_ratio(kpi, realisasi);
        let poin = weighted_points(kpi, ratio);

        sheet.grand_total_poin += poin;
        sheet.details.push(KpiResultDetail {
            id: kpi.id,
            score: ratio * 100.0,
            poin,
            realisasi,
        });
    }

    sheet
}

/// Realized-over-target ratio, inverted for lower-is-better KPIs.
///
/// A ROAS KPI below its minimum target scores zero outright.
pub(crate) fn achievement_ratio(kpi: &KpiConfig, realisasi: f64) -> f64 {
    let target = kpi.target;
    if target <= 0.0 || realisasi <= 0.0 {
        return 0.0;
    }

    if kpi.is_roas() {
        if let Some(floor) = kpi.min_target {
            if realisasi < floor {
                return 0.0;
            }
        }
    }

    match kpi.kpi_type {
        KpiDirection::HigherIsBetter => realisasi / target,
        KpiDirection::LowerIsBetter => target / realisasi.max(RATIO_EPSILON),
    }
}

pub(crate) fn weighted_points(kpi: &KpiConfig, ratio: f64) -> f64 {
    let poin = ratio * kpi.bobot;
    match kpi.point_capping {
        PointCapping::Capped if poin > kpi.bobot => kpi.bobot,
        _ => poin,
    }
}
