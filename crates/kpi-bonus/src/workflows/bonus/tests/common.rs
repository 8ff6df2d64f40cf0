use crate::workflows::bonus::domain::{
    BonusScheme, KpiConfig, KpiDirection, KpiId, KpiIndicator, PointCapping, RealisasiInputs,
    SpecialCalculation, TierId,
};

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

pub(super) fn currency_kpi(
    id: u64,
    platform: &str,
    name: &str,
    bobot: f64,
    target: f64,
) -> KpiConfig {
    KpiConfig {
        is_currency: true,
        ..kpi(id, platform, name, bobot, target)
    }
}

pub(super) fn roas_kpi(id: u64, platform: &str, bobot: f64, target: f64, floor: f64) -> KpiConfig {
    KpiConfig {
        min_target: Some(floor),
        special_calc: Some(SpecialCalculation::Roas),
        ..kpi(id, platform, &format!("ROAS {platform}"), bobot, target)
    }
}

/// ROAS, revenue and ad-cost KPIs for one marketplace, mirroring the advertiser division.
pub(super) fn marketplace(base: u64, platform: &str) -> Vec<KpiConfig> {
    vec![
        roas_kpi(base, platform, 15.0, 12.0, 10.0),
        currency_kpi(
            base + 1,
            platform,
            &format!("Realisasi Omset {platform}"),
            10.0,
            250_000_000.0,
        ),
        KpiConfig {
            kpi_type: KpiDirection::LowerIsBetter,
            ..currency_kpi(
                base + 2,
                platform,
                &format!("Efisiensi Biaya Iklan {platform}"),
                5.0,
                25_000_000.0,
            )
        },
    ]
}

pub(super) fn inputs(entries: &[(u64, &str)]) -> RealisasiInputs {
    entries
        .iter()
        .map(|(id, raw)| (KpiId(*id), raw.to_string()))
        .collect()
}

pub(super) fn scheme(id: u64, name: &str, threshold: f64, multiplier: f64) -> BonusScheme {
    BonusScheme {
        id: TierId(id),
        name: name.to_string(),
        threshold,
        multiplier,
    }
}

pub(super) fn indicators() -> Vec<KpiIndicator> {
    [
        (1, "Bad Perform", -25.0, "bg-red-600"),
        (2, "Under Perform", 40.0, "bg-pink-500"),
        (3, "Average", 60.0, "bg-yellow-500"),
        (4, "Good", 80.0, "bg-blue-500"),
        (5, "Excellent", 100.0, "bg-green-500"),
    ]
    .into_iter()
    .map(|(id, name, threshold, color)| KpiIndicator {
        id: TierId(id),
        name: name.to_string(),
        threshold,
        color: color.to_string(),
    })
    .collect()
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
