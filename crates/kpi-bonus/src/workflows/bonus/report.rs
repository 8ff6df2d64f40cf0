use std::io::Write;

use super::domain::{BonusCalculationMethod, CalculationResult, KpiConfig, UNMATCHED_TIER_NAME};

/// Formats an amount the way payroll statements print Rupiah: `Rp 1.250.000,50`.
pub fn format_rupiah(value: f64) -> String {
    if !value.is_finite() {
        return "Rp 0,00".to_string();
    }

    let cents = (value.abs() * 100.0).round() as u128;
    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}Rp {grouped},{:02}", cents % 100)
}

/// Renders a KPI value using its currency/percentage flags.
pub fn display_kpi_value(kpi: &KpiConfig, value: f64) -> String {
    if kpi.is_currency {
        format_rupiah(value)
    } else if kpi.is_percentage {
        format!("{}%", format_number(value))
    } else {
        format_number(value)
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Writes a calculation as CSV: one row per KPI in configuration order, then summary rows.
///
/// Bonus rows are left out for `NON_SALES` divisions.
pub fn write_report<W: Write>(
    writer: W,
    kpis: &[KpiConfig],
    method: BonusCalculationMethod,
    result: &CalculationResult,
) -> Result<(), csv::Error> {
    let mut out = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    out.write_record(["platform", "kpi", "bobot", "target", "realisasi", "score", "poin"])?;
    for kpi in kpis {
        let (realisasi, score, poin) = match result.detail(kpi.id) {
            Some(detail) => (
                display_kpi_value(kpi, detail.realisasi),
                format!("{:.2}", detail.score),
                format!("{:.3}", detail.poin),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };
        let bobot = format_number(kpi.bobot);
        let target = display_kpi_value(kpi, kpi.target);
        out.write_record([
            kpi.platform.as_str(),
            kpi.name.as_str(),
            bobot.as_str(),
            target.as_str(),
            realisasi.as_str(),
            score.as_str(),
            poin.as_str(),
        ])?;
    }

    let mut summary: Vec<(&str, String)> = vec![
        ("grand_total_poin", format!("{:.3}", result.grand_total_poin)),
        ("kpi_indicator", result.kpi_indicator.name().to_string()),
    ];

    match method {
        BonusCalculationMethod::NonSales => {}
        BonusCalculationMethod::PointsBased => {
            let target_points = result
                .omset_indicator
                .matched()
                .map(|scheme| format_number(scheme.threshold))
                .unwrap_or_else(|| UNMATCHED_TIER_NAME.to_string());
            summary.push(("active_multiplier", format_number(result.active_multiplier)));
            summary.push(("performance_indicator", result.omset_indicator.name().to_string()));
            summary.push(("actual_points", format!("{:.3}", result.grand_total_poin)));
            summary.push(("target_points", target_points));
            summary.push(("final_bonus", format_rupiah(result.final_bonus)));
        }
        BonusCalculationMethod::OmsetBased => {
            summary.push(("active_multiplier", format_number(result.active_multiplier)));
            summary.push(("omset_indicator", result.omset_indicator.name().to_string()));
            summary.push(("omset_realisasi", format_rupiah(result.total_omset_realisasi)));
            summary.push(("omset_target", format_rupiah(result.total_omset_target)));
            summary.push(("final_bonus", format_rupiah(result.final_bonus)));
        }
    }

    for (label, value) in &summary {
        out.write_record([*label, value.as_str()])?;
    }

    out.flush()?;
    Ok(())
}
