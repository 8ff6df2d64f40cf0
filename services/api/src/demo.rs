use crate::infra::{build_service, MemoryPayrollService, OutputFormat};
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use kpi_bonus::error::AppError;
use kpi_bonus::workflows::bonus::report::display_kpi_value;
use kpi_bonus::workflows::bonus::{
    format_rupiah, write_report, BonusCalculationMethod, CalculationResult, KpiConfig,
    RealisasiImporter, RealisasiInputs,
};
use kpi_bonus::workflows::payroll::{
    ConfigurationStore, Division, DivisionSetup, HistoryFilter, NewHistoryEntry,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Name of a demo division, e.g. "Advertiser MP"
    #[arg(long)]
    pub(crate) division: String,
    /// CSV export with `kpi_id,realisasi` columns
    #[arg(long)]
    pub(crate) realisasi: PathBuf,
    /// Output format for the calculation
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Payroll period to record (YYYY-MM). Defaults to the current month.
    #[arg(long, value_parser = crate::infra::parse_period)]
    pub(crate) period: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculationOutput<'a> {
    division: &'a str,
    bonus_calculation_method: BonusCalculationMethod,
    result: &'a CalculationResult,
}

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let CalculateArgs {
        division,
        realisasi,
        format,
    } = args;

    let service = build_service(true)?;
    let setup = division_setup(&service, &division)?;
    let inputs = RealisasiImporter::from_path(&realisasi)?;
    let result = service.calculate_for_division(setup.division.id, &inputs)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => render_text(&mut out, &setup, &result)?,
        OutputFormat::Csv => write_report(
            &mut out,
            &setup.kpis,
            setup.division.bonus_calculation_method,
            &result,
        )?,
        OutputFormat::Json => {
            let output = CalculationOutput {
                division: &setup.division.name,
                bonus_calculation_method: setup.division.bonus_calculation_method,
                result: &result,
            };
            serde_json::to_writer_pretty(&mut out, &output)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let period = args.period.unwrap_or_else(|| {
        let today = Local::now().date_naive();
        today.with_day(1).unwrap_or(today)
    });
    let period_month = period.format("%B").to_string();

    let service = build_service(true)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "KPI bonus demo for {} {}", period_month, period.year())?;
    for division in service.divisions()? {
        let setup = service.setup(division.id)?;
        let inputs = on_target_realisasi(&setup.kpis);
        let result = service.calculate_for_division(division.id, &inputs)?;

        writeln!(out)?;
        render_text(&mut out, &setup, &result)?;

        for employee in service.employees(Some(division.id))? {
            let saved = service.record_history(NewHistoryEntry {
                division_id: Some(division.id),
                division_name: None,
                employee_id: employee.id,
                employee_name: employee.name.clone(),
                date: None,
                period_month: period_month.clone(),
                period_year: period.year(),
                total_points: result.grand_total_poin,
                bonus: result.final_bonus,
                results: result.clone(),
                pdf_data_uri: None,
            })?;
            writeln!(
                out,
                "  saved history #{} for {}",
                saved.id.0, saved.employee_name
            )?;
        }
    }

    let history = service.history(HistoryFilter::default())?;
    writeln!(out, "\n{} calculations recorded", history.len())?;
    Ok(())
}

fn division_setup(service: &MemoryPayrollService, name: &str) -> Result<DivisionSetup, AppError> {
    let division: Division = service
        .configuration()
        .division_by_name(name.trim())?
        .ok_or_else(|| AppError::UnknownDivision(name.to_string()))?;
    Ok(service.setup(division.id)?)
}

/// Realisasi equal to every KPI's target; currency values are typed the way operators do.
fn on_target_realisasi(kpis: &[KpiConfig]) -> RealisasiInputs {
    kpis.iter()
        .filter(|kpi| !kpi.is_roas())
        .map(|kpi| {
            let raw = if kpi.is_currency {
                format_rupiah(kpi.target)
            } else {
                kpi.target.to_string()
            };
            (kpi.id, raw)
        })
        .collect()
}

fn render_text<W: Write>(
    out: &mut W,
    setup: &DivisionSetup,
    result: &CalculationResult,
) -> std::io::Result<()> {
    let method = setup.division.bonus_calculation_method;
    writeln!(out, "{} ({})", setup.division.name, method.label())?;

    for kpi in &setup.kpis {
        match result.detail(kpi.id) {
            Some(detail) => writeln!(
                out,
                "- [{}] {}: {} of {} -> score {:.2} | {:.3} pts",
                kpi.platform,
                kpi.name,
                display_kpi_value(kpi, detail.realisasi),
                display_kpi_value(kpi, kpi.target),
                detail.score,
                detail.poin
            )?,
            None => writeln!(out, "- [{}] {}: not scored", kpi.platform, kpi.name)?,
        }
    }

    writeln!(
        out,
        "Total points {:.3} | indicator {}",
        result.grand_total_poin,
        result.kpi_indicator.name()
    )?;

    match method {
        BonusCalculationMethod::NonSales => {}
        BonusCalculationMethod::OmsetBased => writeln!(
            out,
            "Omset {} of {} | scheme {} x{} | bonus {}",
            format_rupiah(result.total_omset_realisasi),
            format_rupiah(result.total_omset_target),
            result.omset_indicator.name(),
            result.active_multiplier,
            format_rupiah(result.final_bonus)
        )?,
        BonusCalculationMethod::PointsBased => writeln!(
            out,
            "Scheme {} x{} | bonus {}",
            result.omset_indicator.name(),
            result.active_multiplier,
            format_rupiah(result.final_bonus)
        )?,
    }

    Ok(())
}
