//! Roll-up of load, fuel and capital into daily, monthly and annual economics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::household::types::{HOURS_PER_DAY, LoadProfile};
use crate::sim::allocator::AllocatedEnergy;
use crate::sim::fuel::{GeneratorSpec, HourlyFuel};
use crate::sim::report::or_na;

pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Ownership and fuel-property assumptions for the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperationalAssumptions {
    /// Multiplier on fuel cost covering oil, filters and servicing (>= 1).
    pub maintenance_factor: f64,
    pub lifespan_years: f64,
    /// Fraction of the purchase price recovered at end of life, `0..=1`.
    pub resale_value_fraction: f64,
    /// Usable energy per liter of fuel (kWh/L).
    pub energy_content_kwh_per_liter: f64,
    pub co2_kg_per_liter: f64,
}

impl Default for OperationalAssumptions {
    fn default() -> Self {
        Self {
            maintenance_factor: 1.2,
            lifespan_years: 3.0,
            resale_value_fraction: 0.3,
            energy_content_kwh_per_liter: 9.7,
            co2_kg_per_liter: 2.3,
        }
    }
}

impl OperationalAssumptions {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] for the first field out of
    /// bounds.
    pub fn validate(&self) -> Result<()> {
        if !self.maintenance_factor.is_finite() || self.maintenance_factor < 1.0 {
            return Err(EngineError::parameter(
                "operations.maintenance_factor",
                "must be >= 1",
            ));
        }
        if !self.lifespan_years.is_finite() || self.lifespan_years <= 0.0 {
            return Err(EngineError::parameter(
                "operations.lifespan_years",
                "must be > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.resale_value_fraction) {
            return Err(EngineError::parameter(
                "operations.resale_value_fraction",
                "must be in [0, 1]",
            ));
        }
        if !self.energy_content_kwh_per_liter.is_finite() || self.energy_content_kwh_per_liter <= 0.0
        {
            return Err(EngineError::parameter(
                "operations.energy_content_kwh_per_liter",
                "must be > 0",
            ));
        }
        if !self.co2_kg_per_liter.is_finite() || self.co2_kg_per_liter < 0.0 {
            return Err(EngineError::parameter(
                "operations.co2_kg_per_liter",
                "must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Fuel, cost and emissions over a period of whole days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodCosts {
    pub days: f64,
    pub fuel_liters: f64,
    pub fuel_cost: f64,
    /// Fuel cost including maintenance.
    pub total_cost: f64,
    pub capital_cost: f64,
    pub total_with_capital: f64,
    pub co2_kg: f64,
}

impl PeriodCosts {
    fn scaled(daily: &Self, days: f64) -> Self {
        Self {
            days,
            fuel_liters: daily.fuel_liters * days,
            fuel_cost: daily.fuel_cost * days,
            total_cost: daily.total_cost * days,
            capital_cost: daily.capital_cost * days,
            total_with_capital: daily.total_with_capital * days,
            co2_kg: daily.co2_kg * days,
        }
    }
}

/// Cost per kWh of household demand; `None` when the day has no demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostPerKwh {
    pub fuel_only: Option<f64>,
    pub with_maintenance: Option<f64>,
    pub with_capital: Option<f64>,
}

/// Derived economics for one simulated day and its projections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicsSummary {
    pub daily_energy_kwh: f64,
    pub peak_load_kw: f64,
    pub peak_hour: usize,
    pub average_load_kw: f64,
    /// Average over peak load; `None` for an all-zero day.
    pub load_factor: Option<f64>,
    pub peak_to_average: Option<f64>,
    /// Average load over the generator rating (%).
    pub capacity_factor_pct: f64,
    pub generator_rated_kw: f64,
    pub generator_run_hours: usize,
    pub generator_energy_kwh: f64,
    /// Mean burn rate over the hours the generator ran.
    pub average_fuel_rate_lph: Option<f64>,
    pub annual_capital_cost: f64,
    pub daily: PeriodCosts,
    pub monthly: PeriodCosts,
    pub annual: PeriodCosts,
    pub cost_per_kwh: CostPerKwh,
    /// Electrical energy out over chemical energy in (%); `None` when no
    /// fuel was burnt.
    pub overall_efficiency_pct: Option<f64>,
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator > 0.0).then(|| numerator / denominator)
}

/// Computes the economics summary for one day.
///
/// # Arguments
///
/// * `profile` - Hourly household load
/// * `allocation` - Per-hour supply split for `profile`
/// * `fuel` - Per-hour fuel use for `allocation`
/// * `spec` - Generator rating, prices and curve
/// * `assumptions` - Maintenance, lifespan, resale and fuel properties
///
/// # Errors
///
/// * [`EngineError::ProfileLengthMismatch`] if the hourly inputs are not all
///   24 long.
/// * [`EngineError::InvalidParameter`] if `assumptions` are out of bounds.
pub fn summarize(
    profile: &LoadProfile,
    allocation: &[AllocatedEnergy],
    fuel: &[HourlyFuel],
    spec: &GeneratorSpec,
    assumptions: &OperationalAssumptions,
) -> Result<EconomicsSummary> {
    for len in [allocation.len(), fuel.len()] {
        if profile.len() != HOURS_PER_DAY || len != HOURS_PER_DAY {
            return Err(EngineError::ProfileLengthMismatch {
                load_len: profile.len(),
                availability_len: len,
            });
        }
    }
    assumptions.validate()?;

    let daily_energy_kwh = profile.daily_energy_kwh();
    let peak = profile.peak();
    let average_load_kw = daily_energy_kwh / HOURS_PER_DAY as f64;

    let generator_run_hours = allocation.iter().filter(|a| a.generator_ran()).count();
    let generator_energy_kwh: f64 = allocation.iter().map(|a| a.generator_kwh).sum();

    let fuel_liters: f64 = fuel.iter().map(|h| h.liters_per_hour).sum();
    let fuel_cost: f64 = fuel.iter().map(|h| h.cost).sum();
    let total_cost = fuel_cost * assumptions.maintenance_factor;

    let annual_capital_cost = spec.purchase_price * (1.0 - assumptions.resale_value_fraction)
        / assumptions.lifespan_years;
    let capital_cost = annual_capital_cost / DAYS_PER_YEAR;

    let daily = PeriodCosts {
        days: 1.0,
        fuel_liters,
        fuel_cost,
        total_cost,
        capital_cost,
        total_with_capital: total_cost + capital_cost,
        co2_kg: fuel_liters * assumptions.co2_kg_per_liter,
    };

    let cost_per_kwh = CostPerKwh {
        fuel_only: ratio(fuel_cost, daily_energy_kwh),
        with_maintenance: ratio(total_cost, daily_energy_kwh),
        with_capital: ratio(daily.total_with_capital, daily_energy_kwh),
    };

    Ok(EconomicsSummary {
        daily_energy_kwh,
        peak_load_kw: peak.load_kw,
        peak_hour: peak.hour,
        average_load_kw,
        load_factor: ratio(average_load_kw, peak.load_kw),
        peak_to_average: ratio(peak.load_kw, average_load_kw),
        capacity_factor_pct: average_load_kw / spec.rated_kw * 100.0,
        generator_rated_kw: spec.rated_kw,
        generator_run_hours,
        generator_energy_kwh,
        average_fuel_rate_lph: ratio(fuel_liters, generator_run_hours as f64),
        annual_capital_cost,
        monthly: PeriodCosts::scaled(&daily, DAYS_PER_MONTH),
        annual: PeriodCosts::scaled(&daily, DAYS_PER_YEAR),
        daily,
        cost_per_kwh,
        overall_efficiency_pct: ratio(
            generator_energy_kwh * 100.0,
            fuel_liters * assumptions.energy_content_kwh_per_liter,
        ),
    })
}

impl fmt::Display for EconomicsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Generator Economics ---")?;
        writeln!(f, "Daily energy:          {:.2} kWh", self.daily_energy_kwh)?;
        writeln!(
            f,
            "Peak load:             {:.2} kW at {:02}:00",
            self.peak_load_kw, self.peak_hour
        )?;
        writeln!(f, "Average load:          {:.2} kW", self.average_load_kw)?;
        writeln!(f, "Load factor:           {}", or_na(self.load_factor, 3, ""))?;
        writeln!(
            f,
            "Capacity factor:       {:.1}% of {:.1} kW",
            self.capacity_factor_pct, self.generator_rated_kw
        )?;
        writeln!(
            f,
            "Generator runtime:     {} h ({:.2} kWh)",
            self.generator_run_hours, self.generator_energy_kwh
        )?;
        writeln!(f, "Daily fuel:            {:.2} L", self.daily.fuel_liters)?;
        writeln!(f, "Daily fuel cost:       {:.2} NGN", self.daily.fuel_cost)?;
        writeln!(f, "Daily total cost:      {:.2} NGN", self.daily.total_cost)?;
        writeln!(
            f,
            "Daily with capital:    {:.2} NGN",
            self.daily.total_with_capital
        )?;
        writeln!(
            f,
            "Cost per kWh:          {} fuel / {} maint. / {} capital",
            or_na(self.cost_per_kwh.fuel_only, 2, ""),
            or_na(self.cost_per_kwh.with_maintenance, 2, ""),
            or_na(self.cost_per_kwh.with_capital, 2, "")
        )?;
        writeln!(
            f,
            "Monthly cost:          {:.0} NGN ({:.0} with capital)",
            self.monthly.total_cost, self.monthly.total_with_capital
        )?;
        writeln!(
            f,
            "Annual cost:           {:.0} NGN ({:.0} with capital)",
            self.annual.total_cost, self.annual.total_with_capital
        )?;
        writeln!(f, "Annual CO2:            {:.0} kg", self.annual.co2_kg)?;
        write!(
            f,
            "Overall efficiency:    {}",
            or_na(self.overall_efficiency_pct, 1, "%")
        )
    }
}
