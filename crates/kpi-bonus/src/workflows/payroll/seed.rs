use tracing::info;

use super::domain::{DivisionScoped, Employee, EmployeeId, NewDivision};
use super::repository::{ConfigurationStore, StoreError};
use crate::workflows::bonus::{
    BonusCalculationMethod, BonusScheme, KpiConfig, KpiDirection, KpiId, KpiIndicator,
    PointCapping, SpecialCalculation, TierId,
};

/// One division's starting configuration.
#[derive(Debug, Clone)]
pub struct DivisionSeed {
    pub name: &'static str,
    pub method: BonusCalculationMethod,
    pub employees: Vec<Employee>,
    pub kpis: Vec<KpiConfig>,
    pub schemes: Vec<BonusScheme>,
    pub indicators: Vec<KpiIndicator>,
}

/// Counts reported after seeding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub divisions: usize,
    pub employees: usize,
    pub kpis: usize,
    pub schemes: usize,
    pub indicators: usize,
}

/// Loads the demo divisions unless the store already holds divisions.
pub fn seed_store<C: ConfigurationStore + ?Sized>(store: &C) -> Result<SeedSummary, StoreError> {
    if !store.divisions()?.is_empty() {
        info!("configuration store already seeded, skipping");
        return Ok(SeedSummary::default());
    }

    let mut summary = SeedSummary::default();
    for seed in demo_divisions() {
        let division = store.insert_division(NewDivision {
            name: seed.name.to_string(),
            bonus_calculation_method: Some(seed.method),
            cost_keywords: None,
        })?;

        for mut employee in seed.employees {
            employee.division_id = division.id;
            store.insert_employee(employee)?;
        }
        for kpi in seed.kpis {
            store.insert_kpi(DivisionScoped {
                division_id: division.id,
                record: kpi,
            })?;
        }
        for scheme in seed.schemes {
            store.insert_scheme(DivisionScoped {
                division_id: division.id,
                record: scheme,
            })?;
            summary.schemes += 1;
        }
        for indicator in seed.indicators {
            store.insert_indicator(DivisionScoped {
                division_id: division.id,
                record: indicator,
            })?;
            summary.indicators += 1;
        }

        summary.divisions += 1;
        summary.employees = store.employees(None)?.len();
        summary.kpis = store.kpis(None)?.len();
        info!(division = %division.name, method = division.bonus_calculation_method.label(), "seeded division");
    }

    Ok(summary)
}

/// Advertiser MP, SPV Advertiser, Tim Kreatif and Admin Support.
pub fn demo_divisions() -> Vec<DivisionSeed> {
    vec![
        DivisionSeed {
            name: "Advertiser MP",
            method: BonusCalculationMethod::OmsetBased,
            employees: employees(&[(101, "Budi Santoso"), (102, "Citra Lestari")]),
            kpis: vec![
                roas(1, "Shopee", "ROAS Shopee", 15.0, 12.0, 10.0),
                currency(2, "Shopee", "Realisasi Omset Shopee", 10.0, 250_000_000.0, KpiDirection::HigherIsBetter),
                currency(3, "Shopee", "Efisiensi Biaya Iklan Shopee", 5.0, 25_000_000.0, KpiDirection::LowerIsBetter),
                roas(4, "Lazada", "ROAS Lazada", 15.0, 8.0, 6.0),
                currency(5, "Lazada", "Realisasi Omset Lazada", 10.0, 150_000_000.0, KpiDirection::HigherIsBetter),
                currency(6, "Lazada", "Efisiensi Biaya Iklan Lazada", 5.0, 20_000_000.0, KpiDirection::LowerIsBetter),
                roas(7, "TikTok Shop", "ROAS TikTok Shop", 15.0, 5.0, 4.0),
                currency(8, "TikTok Shop", "Realisasi Omset TikTok Shop", 15.0, 100_000_000.0, KpiDirection::HigherIsBetter),
                currency(9, "TikTok Shop", "Efisiensi Biaya Iklan TikTok Shop", 10.0, 20_000_000.0, KpiDirection::LowerIsBetter),
            ],
            schemes: omset_schemes(),
            indicators: standard_indicators(),
        },
        DivisionSeed {
            name: "SPV Advertiser",
            method: BonusCalculationMethod::OmsetBased,
            employees: employees(&[(201, "Rina Wijaya")]),
            kpis: vec![
                currency(10, "Tim", "Total Omset Tim", 40.0, 1_000_000_000.0, KpiDirection::HigherIsBetter),
                KpiConfig {
                    is_percentage: true,
                    ..plain(11, "Tim", "Profitabilitas Tim (%)", 40.0, 20.0)
                },
                plain(12, "Tim", "Pertumbuhan Advertiser Baru", 20.0, 2.0),
            ],
            schemes: omset_schemes(),
            indicators: standard_indicators(),
        },
        DivisionSeed {
            name: "Tim Kreatif",
            method: BonusCalculationMethod::PointsBased,
            employees: employees(&[(301, "Andi Desainer"), (302, "Ria Videographer")]),
            kpis: vec![
                plain(19, "Produksi", "Jumlah Aset Selesai (per bulan)", 30.0, 80.0),
                KpiConfig {
                    kpi_type: KpiDirection::LowerIsBetter,
                    ..plain(20, "Kualitas", "Tingkat Revisi Rata-rata", 25.0, 1.5)
                },
                KpiConfig {
                    point_capping: PointCapping::Capped,
                    ..plain(21, "Kualitas", "Skor Kualitas Internal (skala 1-5)", 20.0, 4.5)
                },
                KpiConfig {
                    is_percentage: true,
                    ..plain(22, "Performa Iklan", "Rata-rata CTR Aset Iklan", 25.0, 2.0)
                },
            ],
            schemes: vec![
                scheme(101, "Good", 80.0, 10.0),
                scheme(102, "Excellent", 95.0, 15.0),
                scheme(103, "Outstanding", 105.0, 20.0),
            ],
            indicators: standard_indicators(),
        },
        DivisionSeed {
            name: "Admin Support",
            method: BonusCalculationMethod::NonSales,
            employees: employees(&[(401, "Dewi Admin")]),
            kpis: vec![
                KpiConfig {
                    kpi_type: KpiDirection::LowerIsBetter,
                    ..plain(30, "Administrasi", "Kecepatan Respon Laporan (jam)", 30.0, 2.0)
                },
                KpiConfig {
                    is_percentage: true,
                    ..plain(31, "Administrasi", "Akurasi Data Entry (%)", 30.0, 99.0)
                },
                KpiConfig {
                    is_percentage: true,
                    ..plain(32, "Administrasi", "Penyelesaian Tugas Tepat Waktu (%)", 25.0, 95.0)
                },
                plain(33, "Dukungan", "Jumlah Tiket Dukungan Terselesaikan", 15.0, 50.0),
            ],
            schemes: Vec::new(),
            indicators: standard_indicators(),
        },
    ]
}

fn employees(rows: &[(u64, &str)]) -> Vec<Employee> {
    rows.iter()
        .map(|(id, name)| Employee {
            id: EmployeeId(*id),
            division_id: Default::default(),
            name: name.to_string(),
        })
        .collect()
}

fn plain(id: u64, platform: &str, name: &str, bobot: f64, target: f64) -> KpiConfig {
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

fn currency(
    id: u64,
    platform: &str,
    name: &str,
    bobot: f64,
    target: f64,
    kpi_type: KpiDirection,
) -> KpiConfig {
    KpiConfig {
        is_currency: true,
        kpi_type,
        ..plain(id, platform, name, bobot, target)
    }
}

fn roas(id: u64, platform: &str, name: &str, bobot: f64, target: f64, min_target: f64) -> KpiConfig {
    KpiConfig {
        min_target: Some(min_target),
        special_calc: Some(SpecialCalculation::Roas),
        ..plain(id, platform, name, bobot, target)
    }
}

fn scheme(id: u64, name: &str, threshold: f64, multiplier: f64) -> BonusScheme {
    BonusScheme {
        id: TierId(id),
        name: name.to_string(),
        threshold,
        multiplier,
    }
}

fn omset_schemes() -> Vec<BonusScheme> {
    vec![
        scheme(1, "Bad Perform 1", 500_000_000.0, 8.0),
        scheme(2, "Average 1", 975_000_000.0, 13.0),
        scheme(3, "Excellent 1", 1_950_000_000.0, 19.0),
    ]
}

fn standard_indicators() -> Vec<KpiIndicator> {
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
