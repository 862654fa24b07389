use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::sim::allocator::AllocatedEnergy;
use crate::sim::economics::{DAYS_PER_MONTH, DAYS_PER_YEAR};
use crate::sim::report::or_na;

/// Flat per-kWh prices for grid and generator energy (NGN/kWh).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tariff {
    pub grid_per_kwh: f64,
    pub generator_per_kwh: f64,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            grid_per_kwh: 100.0,
            generator_per_kwh: 150.0,
        }
    }
}

impl Tariff {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] if either price is negative
    /// or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.grid_per_kwh.is_finite() || self.grid_per_kwh < 0.0 {
            return Err(EngineError::parameter("tariff.grid_per_kwh", "must be >= 0"));
        }
        if !self.generator_per_kwh.is_finite() || self.generator_per_kwh < 0.0 {
            return Err(EngineError::parameter(
                "tariff.generator_per_kwh",
                "must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Daily supply totals priced at flat tariffs.
///
/// Unserved energy is reported but never priced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplyCost {
    pub tariff: Tariff,
    pub total_demand_kwh: f64,
    pub grid_kwh: f64,
    pub generator_kwh: f64,
    pub unserved_kwh: f64,
    pub generator_run_hours: usize,
    pub grid_cost: f64,
    pub generator_cost: f64,
    pub daily_cost: f64,
    pub monthly_cost: f64,
    pub annual_cost: f64,
    /// Fractions of demand per source; `None` when there is no demand.
    pub grid_share: Option<f64>,
    pub generator_share: Option<f64>,
    pub unserved_share: Option<f64>,
}

impl SupplyCost {
    /// Sums an allocation by source and prices it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] for an invalid tariff.
    pub fn from_allocation(allocation: &[AllocatedEnergy], tariff: Tariff) -> Result<Self> {
        tariff.validate()?;

        let mut grid_kwh = 0.0;
        let mut generator_kwh = 0.0;
        let mut unserved_kwh = 0.0;
        let mut generator_run_hours = 0;
        for a in allocation {
            grid_kwh += a.grid_kwh;
            generator_kwh += a.generator_kwh;
            unserved_kwh += a.unserved_kwh;
            if a.generator_ran() {
                generator_run_hours += 1;
            }
        }

        let total_demand_kwh = grid_kwh + generator_kwh + unserved_kwh;
        let grid_cost = grid_kwh * tariff.grid_per_kwh;
        let generator_cost = generator_kwh * tariff.generator_per_kwh;
        let daily_cost = grid_cost + generator_cost;
        let share = |kwh: f64| (total_demand_kwh > 0.0).then(|| kwh / total_demand_kwh);

        Ok(Self {
            tariff,
            total_demand_kwh,
            grid_kwh,
            generator_kwh,
            unserved_kwh,
            generator_run_hours,
            grid_cost,
            generator_cost,
            daily_cost,
            monthly_cost: daily_cost * DAYS_PER_MONTH,
            annual_cost: daily_cost * DAYS_PER_YEAR,
            grid_share: share(grid_kwh),
            generator_share: share(generator_kwh),
            unserved_share: share(unserved_kwh),
        })
    }
}

impl fmt::Display for SupplyCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = |s: Option<f64>| or_na(s.map(|v| v * 100.0), 1, "%");
        writeln!(f, "--- Supply Cost ---")?;
        writeln!(
            f,
            "Grid energy:           {:.2} kWh ({})",
            self.grid_kwh,
            pct(self.grid_share)
        )?;
        writeln!(
            f,
            "Generator energy:      {:.2} kWh ({}, {} h)",
            self.generator_kwh,
            pct(self.generator_share),
            self.generator_run_hours
        )?;
        writeln!(
            f,
            "Unserved energy:       {:.2} kWh ({})",
            self.unserved_kwh,
            pct(self.unserved_share)
        )?;
        writeln!(
            f,
            "Grid cost:             {:.2} NGN @ {:.2} NGN/kWh",
            self.grid_cost, self.tariff.grid_per_kwh
        )?;
        writeln!(
            f,
            "Generator cost:        {:.2} NGN @ {:.2} NGN/kWh",
            self.generator_cost, self.tariff.generator_per_kwh
        )?;
        writeln!(f, "Daily supply cost:     {:.2} NGN", self.daily_cost)?;
        writeln!(f, "Monthly supply cost:   {:.0} NGN", self.monthly_cost)?;
        write!(f, "Annual supply cost:    {:.0} NGN", self.annual_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::allocator::allocate;

    #[test]
    fn prices_each_source_at_its_tariff() {
        let mut available = [true; 24];
        available[20] = false;
        available[3] = false;
        let mut loads = [1.0; 24];
        loads[3] = 0.2;
        let alloc = allocate(&loads, &available, 0.5).unwrap();
        let cost = SupplyCost::from_allocation(&alloc, Tariff::default()).unwrap();

        assert!((cost.grid_kwh - 22.0).abs() < 1e-9);
        assert_eq!(cost.generator_kwh, 1.0);
        assert_eq!(cost.unserved_kwh, 0.2);
        assert_eq!(cost.generator_run_hours, 1);
        assert!((cost.daily_cost - 2350.0).abs() < 1e-9);
        assert!((cost.annual_cost - 2350.0 * 365.0).abs() < 1e-6);
    }

    #[test]
    fn shares_sum_to_one() {
        let mut available = [true; 24];
        available[0] = false;
        let alloc = allocate(&[2.0; 24], &available, 0.5).unwrap();
        let cost = SupplyCost::from_allocation(&alloc, Tariff::default()).unwrap();
        let total = cost.grid_share.unwrap()
            + cost.generator_share.unwrap()
            + cost.unserved_share.unwrap();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn no_demand_has_no_shares() {
        let alloc = allocate(&[0.0; 24], &[true; 24], 0.5).unwrap();
        let cost = SupplyCost::from_allocation(&alloc, Tariff::default()).unwrap();
        assert_eq!(cost.grid_share, None);
        assert_eq!(cost.daily_cost, 0.0);
        assert!(cost.to_string().contains("n/a"));
    }

    #[test]
    fn negative_tariff_is_rejected() {
        let tariff = Tariff {
            grid_per_kwh: -1.0,
            ..Tariff::default()
        };
        let alloc = allocate(&[1.0; 24], &[true; 24], 0.5).unwrap();
        assert!(SupplyCost::from_allocation(&alloc, tariff).is_err());
    }
}
