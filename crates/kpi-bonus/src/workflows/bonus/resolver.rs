use std::collections::HashMap;

use tracing::debug;

use super::domain::{KpiConfig, KpiId, RealisasiInputs};
use super::keywords::CostKeywords;
use super::normalizer::parse_rupiah;

/// KPIs in one platform group that feed a derived ROAS value.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RoasRoles<'a> {
    pub roas: &'a KpiConfig,
    pub revenue: &'a KpiConfig,
    pub cost: &'a KpiConfig,
}

/// Platform labels in first-seen order.
pub(crate) fn platforms(kpis: &[KpiConfig]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for kpi in kpis {
        if !seen.contains(&kpi.platform.as_str()) {
            seen.push(kpi.platform.as_str());
        }
    }
    seen
}

/// Locates the ROAS, revenue and cost KPIs of a platform with a linear scan in input order.
///
/// Revenue is the first KPI named "omset"; without one, the first currency KPI that is
/// neither a cost KPI nor the ROAS slot. Returns `None` when any role is missing.
pub(crate) fn roas_roles<'a>(
    kpis: &'a [KpiConfig],
    platform: &str,
    keywords: &CostKeywords,
) -> Option<RoasRoles<'a>> {
    let group = || kpis.iter().filter(move |kpi| kpi.platform == platform);

    let roas = group().find(|kpi| kpi.is_roas())?;
    let revenue = group()
        .find(|kpi| kpi.name.to_lowercase().contains("omset"))
        .or_else(|| {
            group().find(|kpi| kpi.is_currency && !keywords.is_cost(&kpi.name) && !kpi.is_roas())
        })?;
    let cost = group().find(|kpi| keywords.is_cost(&kpi.name))?;

    Some(RoasRoles {
        roas,
        revenue,
        cost,
    })
}

/// Derives ROAS for every platform whose roles resolve, keyed by the ROAS KPI.
pub(crate) fn resolve_roas(
    kpis: &[KpiConfig],
    inputs: &RealisasiInputs,
    keywords: &CostKeywords,
) -> HashMap<KpiId, f64> {
    let mut derived = HashMap::new();

    for platform in platforms(kpis) {
        let Some(roles) = roas_roles(kpis, platform, keywords) else {
            debug!(platform, "roas roles unresolved; derived value left at zero");
            continue;
        };

        let revenue = realized_currency(inputs, roles.revenue.id);
        let cost = realized_currency(inputs, roles.cost.id);
        let roas = if cost > 0.0 { revenue / cost } else { 0.0 };

        debug!(platform, revenue, cost, roas, "derived roas");
        derived.insert(roles.roas.id, roas);
    }

    derived
}

fn realized_currency(inputs: &RealisasiInputs, id: KpiId) -> f64 {
    inputs
        .get(&id)
        .map(|raw| parse_rupiah(raw))
        .unwrap_or(0.0)
}
