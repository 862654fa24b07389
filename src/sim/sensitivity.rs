use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::sim::economics::DAYS_PER_MONTH;

/// Upper bound on the number of swept prices.
pub const MAX_SWEEP_POINTS: usize = 1000;

/// Fuel prices to sweep: `points` evenly spaced values from `min_price` to
/// `max_price` inclusive (NGN/L).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepRange {
    pub min_price: f64,
    pub max_price: f64,
    pub points: usize,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            min_price: 500.0,
            max_price: 1200.0,
            points: 15,
        }
    }
}

impl SweepRange {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] if the point count is
    /// outside `2..=MAX_SWEEP_POINTS` or the bounds are reversed, negative or
    /// not finite.
    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_SWEEP_POINTS).contains(&self.points) {
            return Err(EngineError::parameter(
                "sensitivity.points",
                format!("must be between 2 and {MAX_SWEEP_POINTS}"),
            ));
        }
        if !self.min_price.is_finite() || !self.max_price.is_finite() || self.min_price < 0.0 {
            return Err(EngineError::parameter(
                "sensitivity.min_price",
                "bounds must be finite values >= 0",
            ));
        }
        if self.min_price > self.max_price {
            return Err(EngineError::parameter(
                "sensitivity.min_price",
                format!(
                    "{} is above max_price {}",
                    self.min_price, self.max_price
                ),
            ));
        }
        Ok(())
    }

    /// Only meaningful after [`SweepRange::validate`] succeeded.
    fn prices(&self) -> Vec<f64> {
        let step = (self.max_price - self.min_price) / (self.points - 1) as f64;
        (0..self.points)
            .map(|i| {
                if i + 1 == self.points {
                    self.max_price
                } else {
                    self.min_price + step * i as f64
                }
            })
            .collect()
    }
}

/// Daily generator cost at one fuel price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensitivityPoint {
    pub fuel_price_per_liter: f64,
    pub daily_fuel_cost: f64,
    pub daily_total_cost: f64,
    pub monthly_total_cost: f64,
}

/// Re-prices a day's fuel volume across a range of fuel prices.
///
/// The liters burnt do not depend on price, so each point is the same
/// volume at a different price, with maintenance applied on top.
///
/// # Errors
///
/// See [`SweepRange::validate`].
pub fn fuel_price_sweep(
    daily_fuel_liters: f64,
    maintenance_factor: f64,
    range: &SweepRange,
) -> Result<Vec<SensitivityPoint>> {
    range.validate()?;
    Ok(range
        .prices()
        .into_iter()
        .map(|price| {
            let daily_fuel_cost = daily_fuel_liters * price;
            let daily_total_cost = daily_fuel_cost * maintenance_factor;
            SensitivityPoint {
                fuel_price_per_liter: price,
                daily_fuel_cost,
                daily_total_cost,
                monthly_total_cost: daily_total_cost * DAYS_PER_MONTH,
            }
        })
        .collect())
}
