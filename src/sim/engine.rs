//! Pipeline that turns one scenario configuration into an [`AnalysisReport`].

use tracing::{debug, info, warn};

use crate::config::ScenarioConfig;
use crate::error::Result;
use crate::household::appliance::{ApplianceRecord, compute_daily_energy};
use crate::household::profile::ProfilePlan;
use crate::sim::allocator::{SupplySource, allocate};
use crate::sim::economics::{OperationalAssumptions, summarize};
use crate::sim::fuel::{GeneratorSpec, hourly_fuel};
use crate::sim::grid::GridSchedule;
use crate::sim::insights::LoadInsights;
use crate::sim::report::AnalysisReport;
use crate::sim::sensitivity::{SweepRange, fuel_price_sweep};
use crate::sim::tariff::{SupplyCost, Tariff};

/// Validated inputs for one analysis run.
///
/// Construction checks everything that can be checked without running the
/// pipeline; [`Engine::run`] then executes the stages in order:
/// inventory, profile, allocation, fuel, economics, supply cost, insights
/// and the fuel price sweep.
#[derive(Debug, Clone)]
pub struct Engine {
    scenario: String,
    appliances: Vec<ApplianceRecord>,
    plan: ProfilePlan,
    grid: GridSchedule,
    generator_threshold_kw: f64,
    generator: GeneratorSpec,
    assumptions: OperationalAssumptions,
    tariff: Tariff,
    sweep: SweepRange,
}

impl Engine {
    /// Builds the engine from a parsed scenario.
    ///
    /// # Errors
    ///
    /// Returns the first [`EngineError`](crate::error::EngineError) found in
    /// the grid schedule, generator, operational assumptions, tariff or
    /// sweep range.
    pub fn from_config(cfg: &ScenarioConfig) -> Result<Self> {
        let grid = cfg.grid.to_schedule()?;
        let generator = cfg.generator.to_spec()?;
        cfg.allocation.validate()?;
        cfg.operations.validate()?;
        cfg.tariff.validate()?;
        cfg.sensitivity.validate()?;

        Ok(Self {
            scenario: cfg.name.clone(),
            appliances: cfg.household.appliances.clone(),
            plan: cfg.profile.to_plan(),
            grid,
            generator_threshold_kw: cfg.allocation.generator_threshold_kw,
            generator,
            assumptions: cfg.operations.clone(),
            tariff: cfg.tariff,
            sweep: cfg.sensitivity.clone(),
        })
    }

    /// Runs every stage once and collects the results.
    ///
    /// # Errors
    ///
    /// Propagates the first stage failure unchanged; no hour is skipped.
    pub fn run(&self) -> Result<AnalysisReport> {
        info!(scenario = %self.scenario, "starting analysis");

        let inventory = compute_daily_energy(&self.appliances)?;
        debug!(
            appliances = inventory.appliances.len(),
            daily_kwh = inventory.total_daily_energy_kwh(),
            "appliance inventory"
        );

        let profile = self.plan.build()?;
        let loads = profile.loads_kw();
        let allocation = allocate(&loads, self.grid.flags(), self.generator_threshold_kw)?;
        for a in allocation.iter().filter(|a| a.source == SupplySource::Unserved) {
            if a.unserved_kwh > 0.0 {
                debug!(hour = a.hour, kw = a.unserved_kwh, "load below generator threshold");
            }
        }

        let fuel = hourly_fuel(&allocation, &self.generator);
        for h in fuel.iter().filter(|h| h.liters_per_hour > 0.0) {
            debug!(
                hour = h.hour,
                kw = h.generator_kw,
                liters = h.liters_per_hour,
                "generator hour"
            );
            if h.generator_kw > self.generator.rated_kw {
                warn!(
                    hour = h.hour,
                    kw = h.generator_kw,
                    rated_kw = self.generator.rated_kw,
                    "generator overloaded, fuel capped at full-load rate"
                );
            }
        }

        let economics = summarize(
            &profile,
            &allocation,
            &fuel,
            &self.generator,
            &self.assumptions,
        )?;
        let supply_cost = SupplyCost::from_allocation(&allocation, self.tariff)?;
        let insights = LoadInsights::from_profile(&profile);
        let sensitivity = fuel_price_sweep(
            economics.daily.fuel_liters,
            self.assumptions.maintenance_factor,
            &self.sweep,
        )?;

        info!(
            daily_kwh = economics.daily_energy_kwh,
            peak_kw = economics.peak_load_kw,
            liters = economics.daily.fuel_liters,
            unserved_kwh = supply_cost.unserved_kwh,
            "analysis complete"
        );

        Ok(AnalysisReport {
            scenario: self.scenario.clone(),
            inventory,
            profile,
            grid: self.grid.clone(),
            generator_threshold_kw: self.generator_threshold_kw,
            generator: self.generator.clone(),
            assumptions: self.assumptions.clone(),
            allocation,
            fuel,
            economics,
            supply_cost,
            insights,
            sensitivity,
        })
    }
}
