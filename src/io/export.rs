//! CSV export for the appliance, hourly and summary tables of a run.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::household::appliance::ApplianceInventory;
use crate::sim::report::{AnalysisReport, HourlyRecord};

const APPLIANCES_HEADER: &str = "appliance,quantity,power_w,daily_hours,usage_pattern,\
                                 total_power_w,daily_energy_wh,daily_energy_kwh";

const HOURLY_HEADER: &str = "hour,hour_label,load_kw,grid_available,grid_kwh,\
                             generator_kwh,unserved_kwh,load_percent,fuel_l_per_hour,\
                             hourly_fuel_cost,cumulative_fuel_l,cumulative_cost,\
                             cost_per_kwh,generator_efficiency_pct";

pub const APPLIANCES_FILE: &str = "appliances.csv";
pub const HOURLY_FILE: &str = "hourly.csv";
pub const SUMMARY_FILE: &str = "summary.csv";

fn header(columns: &str) -> impl Iterator<Item = &str> {
    columns.split(',').map(str::trim)
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.4}")).unwrap_or_default()
}

/// Writes the appliance table as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_appliances_csv(inventory: &ApplianceInventory, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header(APPLIANCES_HEADER))?;

    for a in &inventory.appliances {
        let r = &a.record;
        wtr.write_record(&[
            r.name.clone(),
            r.quantity.to_string(),
            format!("{:.2}", r.rated_power_w),
            format!("{:.2}", r.daily_hours),
            r.usage_pattern.clone(),
            format!("{:.2}", a.total_power_w),
            format!("{:.2}", a.daily_energy_wh),
            format!("{:.4}", a.daily_energy_kwh()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the 24 joined hourly rows as CSV to any writer.
///
/// A missing generator efficiency is written as an empty cell.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_hourly_csv(rows: &[HourlyRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header(HOURLY_HEADER))?;

    for r in rows {
        wtr.write_record(&[
            r.hour.to_string(),
            r.hour_label.clone(),
            format!("{:.4}", r.load_kw),
            r.grid_available.to_string(),
            format!("{:.4}", r.grid_kwh),
            format!("{:.4}", r.generator_kwh),
            format!("{:.4}", r.unserved_kwh),
            format!("{:.2}", r.load_percent),
            format!("{:.4}", r.fuel_l_per_hour),
            format!("{:.2}", r.hourly_fuel_cost),
            format!("{:.4}", r.cumulative_fuel_l),
            format!("{:.2}", r.cumulative_cost),
            format!("{:.2}", r.cost_per_kwh),
            opt(r.generator_efficiency_pct),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Metric/value pairs of the summary table, sentinels as `None`.
pub fn summary_rows(report: &AnalysisReport) -> Vec<(&'static str, Option<f64>)> {
    let e = &report.economics;
    let s = &report.supply_cost;
    let i = &report.insights;
    vec![
        ("daily_energy_kwh", Some(e.daily_energy_kwh)),
        ("peak_load_kw", Some(e.peak_load_kw)),
        ("peak_hour", Some(e.peak_hour as f64)),
        ("average_load_kw", Some(e.average_load_kw)),
        ("load_factor", e.load_factor),
        ("peak_to_average", e.peak_to_average),
        ("capacity_factor_pct", Some(e.capacity_factor_pct)),
        ("generator_run_hours", Some(e.generator_run_hours as f64)),
        ("generator_energy_kwh", Some(e.generator_energy_kwh)),
        ("average_fuel_rate_lph", e.average_fuel_rate_lph),
        ("daily_fuel_liters", Some(e.daily.fuel_liters)),
        ("daily_fuel_cost", Some(e.daily.fuel_cost)),
        ("daily_total_cost", Some(e.daily.total_cost)),
        ("daily_capital_cost", Some(e.daily.capital_cost)),
        ("daily_total_with_capital", Some(e.daily.total_with_capital)),
        ("monthly_total_cost", Some(e.monthly.total_cost)),
        ("monthly_total_with_capital", Some(e.monthly.total_with_capital)),
        ("annual_total_cost", Some(e.annual.total_cost)),
        ("annual_total_with_capital", Some(e.annual.total_with_capital)),
        ("annual_capital_cost", Some(e.annual_capital_cost)),
        ("cost_per_kwh_fuel_only", e.cost_per_kwh.fuel_only),
        ("cost_per_kwh_with_maintenance", e.cost_per_kwh.with_maintenance),
        ("cost_per_kwh_with_capital", e.cost_per_kwh.with_capital),
        ("overall_efficiency_pct", e.overall_efficiency_pct),
        ("daily_co2_kg", Some(e.daily.co2_kg)),
        ("annual_co2_kg", Some(e.annual.co2_kg)),
        ("grid_kwh", Some(s.grid_kwh)),
        ("unserved_kwh", Some(s.unserved_kwh)),
        ("grid_cost", Some(s.grid_cost)),
        ("generator_tariff_cost", Some(s.generator_cost)),
        ("daily_supply_cost", Some(s.daily_cost)),
        ("evening_share", i.evening_share),
        ("peak_to_base", i.peak_to_base),
    ]
}

/// Writes the summary table as `metric,value` CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_summary_csv(report: &AnalysisReport, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(["metric", "value"])?;
    for (metric, value) in summary_rows(report) {
        wtr.write_record([metric, opt(value).as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

fn create(dir: &Path, name: &str) -> io::Result<(PathBuf, io::BufWriter<File>)> {
    let path = dir.join(name);
    let file = File::create(&path)?;
    Ok((path, io::BufWriter::new(file)))
}

/// Writes all three tables into `dir`, creating it if needed.
///
/// Produces deterministic output for identical reports.
///
/// # Errors
///
/// Returns an `io::Error` if the directory or any file cannot be written.
pub fn export_all(report: &AnalysisReport, dir: &Path) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let (appliances, buf) = create(dir, APPLIANCES_FILE)?;
    write_appliances_csv(&report.inventory, buf)?;
    let (hourly, buf) = create(dir, HOURLY_FILE)?;
    write_hourly_csv(&report.hourly_records(), buf)?;
    let (summary, buf) = create(dir, SUMMARY_FILE)?;
    write_summary_csv(report, buf)?;

    Ok(vec![appliances, hourly, summary])
}
