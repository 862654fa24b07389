//! Finished analysis run and its per-hour table.

use std::fmt;

use serde::Serialize;

use crate::household::appliance::ApplianceInventory;
use crate::household::types::LoadProfile;
use crate::sim::allocator::{AllocatedEnergy, SupplySource};
use crate::sim::economics::{EconomicsSummary, OperationalAssumptions};
use crate::sim::fuel::{GeneratorSpec, HourlyFuel};
use crate::sim::grid::GridSchedule;
use crate::sim::insights::LoadInsights;
use crate::sim::sensitivity::SensitivityPoint;
use crate::sim::tariff::SupplyCost;

/// Generator energy an hour must exceed before its cost per kWh is reported.
pub const MIN_COST_PER_KWH_GENERATOR_KWH: f64 = 0.1;

/// Formats an optional metric, printing `n/a` for a missing value.
pub(crate) fn or_na(value: Option<f64>, precision: usize, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.precision$}{unit}"),
        None => "n/a".to_string(),
    }
}

/// One row of the hourly table, joining load, supply and fuel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub hour: usize,
    pub hour_label: String,
    pub load_kw: f64,
    pub grid_available: bool,
    pub source: SupplySource,
    pub grid_kwh: f64,
    pub generator_kwh: f64,
    pub unserved_kwh: f64,
    pub load_percent: f64,
    pub fuel_l_per_hour: f64,
    pub hourly_fuel_cost: f64,
    pub cumulative_fuel_l: f64,
    pub cumulative_cost: f64,
    /// Fuel cost per generator kWh, 0 for hours with little or no generator
    /// energy.
    pub cost_per_kwh: f64,
    pub generator_efficiency_pct: Option<f64>,
}

impl HourlyRecord {
    fn join(
        load_kw: f64,
        grid_available: bool,
        alloc: &AllocatedEnergy,
        fuel: &HourlyFuel,
        energy_content_kwh_per_liter: f64,
    ) -> Self {
        let cost_per_kwh = if alloc.generator_kwh > MIN_COST_PER_KWH_GENERATOR_KWH {
            fuel.cost / alloc.generator_kwh
        } else {
            0.0
        };
        let generator_efficiency_pct = (fuel.liters_per_hour > 0.0).then(|| {
            alloc.generator_kwh / (fuel.liters_per_hour * energy_content_kwh_per_liter) * 100.0
        });

        Self {
            hour: alloc.hour,
            hour_label: format!("{:02}:00", alloc.hour),
            load_kw,
            grid_available,
            source: alloc.source,
            grid_kwh: alloc.grid_kwh,
            generator_kwh: alloc.generator_kwh,
            unserved_kwh: alloc.unserved_kwh,
            load_percent: fuel.load_percent,
            fuel_l_per_hour: fuel.liters_per_hour,
            hourly_fuel_cost: fuel.cost,
            cumulative_fuel_l: fuel.cumulative_liters,
            cumulative_cost: fuel.cumulative_cost,
            cost_per_kwh,
            generator_efficiency_pct,
        }
    }
}

/// Every table and aggregate produced by one run of the engine.
///
/// Built once and read by the text report, the CSV exporters and the HTTP
/// API; nothing here is recomputed downstream.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub scenario: String,
    pub inventory: ApplianceInventory,
    pub profile: LoadProfile,
    pub grid: GridSchedule,
    pub generator_threshold_kw: f64,
    pub generator: GeneratorSpec,
    pub assumptions: OperationalAssumptions,
    pub allocation: Vec<AllocatedEnergy>,
    pub fuel: Vec<HourlyFuel>,
    pub economics: EconomicsSummary,
    pub supply_cost: SupplyCost,
    pub insights: LoadInsights,
    pub sensitivity: Vec<SensitivityPoint>,
}

impl AnalysisReport {
    /// The 24 joined hourly rows, in hour order.
    pub fn hourly_records(&self) -> Vec<HourlyRecord> {
        self.profile
            .points()
            .iter()
            .zip(&self.allocation)
            .zip(&self.fuel)
            .map(|((point, alloc), fuel)| {
                HourlyRecord::join(
                    point.load_kw,
                    self.grid.is_available(point.hour),
                    alloc,
                    fuel,
                    self.assumptions.energy_content_kwh_per_liter,
                )
            })
            .collect()
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Scenario: {} ===", self.scenario)?;
        writeln!(f, "--- Appliances ---")?;
        writeln!(f, "Appliance count:       {}", self.inventory.appliances.len())?;
        writeln!(
            f,
            "Connected load:        {:.2} kW",
            self.inventory.connected_load_w / 1000.0
        )?;
        writeln!(
            f,
            "Appliance energy:      {:.2} kWh/day",
            self.inventory.total_daily_energy_kwh()
        )?;
        for a in self.inventory.top_consumers(3) {
            writeln!(
                f,
                "  {:<20} {:.2} kWh/day",
                a.record.name,
                a.daily_energy_kwh()
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.insights)?;
        writeln!(f)?;
        writeln!(f, "{}", self.supply_cost)?;
        writeln!(f)?;
        write!(f, "{}", self.economics)
    }
}
