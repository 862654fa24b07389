//! Generator fuel-burn model: efficiency curve interpolation and per-hour fuel
//! volume and cost with running totals.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::sim::allocator::AllocatedEnergy;

/// A `(load %, fuel rate)` anchor on a generator's efficiency curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    pub load_percent: f64,
    pub liters_per_hour: f64,
}

impl Breakpoint {
    pub const fn new(load_percent: f64, liters_per_hour: f64) -> Self {
        Self {
            load_percent,
            liters_per_hour,
        }
    }
}

/// Validated piecewise-linear fuel curve covering 0-100 % load.
///
/// # Examples
///
/// ```
/// use backup_power_sim::sim::fuel::{Breakpoint, EfficiencyCurve};
///
/// let curve = EfficiencyCurve::new(vec![
///     Breakpoint::new(0.0, 0.0),
///     Breakpoint::new(50.0, 3.5),
///     Breakpoint::new(100.0, 6.5),
/// ])
/// .unwrap();
/// assert_eq!(curve.rate_at_percent(50.0), 3.5);
/// assert_eq!(curve.rate_at_percent(75.0), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EfficiencyCurve {
    points: Vec<Breakpoint>,
}

impl EfficiencyCurve {
    /// Validates and wraps the breakpoints.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidEfficiencyCurve`] if there are fewer
    /// than two points, the first is not at 0 % or the last not at 100 %,
    /// load percentages are not strictly increasing, or a rate is negative,
    /// non-finite or lower than the rate before it.
    pub fn new(points: Vec<Breakpoint>) -> Result<Self> {
        let invalid = |msg: String| Err(EngineError::InvalidEfficiencyCurve(msg));

        if points.len() < 2 {
            return invalid(format!("need at least 2 breakpoints, got {}", points.len()));
        }
        let first = points[0].load_percent;
        let last = points[points.len() - 1].load_percent;
        if first != 0.0 {
            return invalid(format!("first breakpoint must be at 0 %, got {first}"));
        }
        if last != 100.0 {
            return invalid(format!("last breakpoint must be at 100 %, got {last}"));
        }
        for p in &points {
            if !p.liters_per_hour.is_finite() || p.liters_per_hour < 0.0 {
                return invalid(format!(
                    "rate at {} % must be a finite value >= 0, got {}",
                    p.load_percent, p.liters_per_hour
                ));
            }
        }
        for pair in points.windows(2) {
            if pair[1].load_percent <= pair[0].load_percent {
                return invalid(format!(
                    "load percentages must be strictly increasing ({} then {})",
                    pair[0].load_percent, pair[1].load_percent
                ));
            }
            if pair[1].liters_per_hour < pair[0].liters_per_hour {
                return invalid(format!(
                    "fuel rate drops between {} % and {} %",
                    pair[0].load_percent, pair[1].load_percent
                ));
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Fuel rate (L/h) at `load_percent`, clamped to `[0, 100]`.
    ///
    /// Exactly at a breakpoint the literal rate is returned, so anchors are
    /// reproduced without interpolation rounding.
    pub fn rate_at_percent(&self, load_percent: f64) -> f64 {
        let pct = load_percent.clamp(0.0, 100.0);
        if let Some(p) = self.points.iter().find(|p| p.load_percent == pct) {
            return p.liters_per_hour;
        }
        for pair in self.points.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if pct < hi.load_percent {
                let t = (pct - lo.load_percent) / (hi.load_percent - lo.load_percent);
                return lo.liters_per_hour + (hi.liters_per_hour - lo.liters_per_hour) * t;
            }
        }
        self.points[self.points.len() - 1].liters_per_hour
    }
}

/// Backup generator rating, prices and efficiency curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorSpec {
    pub rated_kw: f64,
    pub fuel_price_per_liter: f64,
    pub purchase_price: f64,
    pub curve: EfficiencyCurve,
}

impl GeneratorSpec {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] if the rating or fuel price
    /// is not strictly positive, or the purchase price is negative.
    pub fn new(
        rated_kw: f64,
        fuel_price_per_liter: f64,
        purchase_price: f64,
        curve: EfficiencyCurve,
    ) -> Result<Self> {
        if !rated_kw.is_finite() || rated_kw <= 0.0 {
            return Err(EngineError::parameter("generator.rated_kw", "must be > 0"));
        }
        if !fuel_price_per_liter.is_finite() || fuel_price_per_liter <= 0.0 {
            return Err(EngineError::parameter(
                "generator.fuel_price_per_liter",
                "must be > 0",
            ));
        }
        if !purchase_price.is_finite() || purchase_price < 0.0 {
            return Err(EngineError::parameter(
                "generator.purchase_price",
                "must be >= 0",
            ));
        }
        Ok(Self {
            rated_kw,
            fuel_price_per_liter,
            purchase_price,
            curve,
        })
    }

    /// Share of the rating drawn by `load_kw`, capped at 100 %.
    pub fn load_percent(&self, load_kw: f64) -> f64 {
        (load_kw / self.rated_kw * 100.0).min(100.0)
    }

    pub fn fuel_rate(&self, load_kw: f64) -> f64 {
        self.curve.rate_at_percent(self.load_percent(load_kw))
    }
}

/// Fuel burn rate (L/h) for the generator running at `load_kw`.
pub fn fuel_rate(load_kw: f64, spec: &GeneratorSpec) -> f64 {
    spec.fuel_rate(load_kw)
}

/// Fuel use for one hour, with running totals from hour 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyFuel {
    pub hour: usize,
    /// Average generator output over the hour (kW).
    pub generator_kw: f64,
    pub load_percent: f64,
    pub liters_per_hour: f64,
    pub cost: f64,
    pub cumulative_liters: f64,
    pub cumulative_cost: f64,
}

/// Fuel volume and cost for each hour of an allocation.
///
/// Only hours with generator energy burn fuel; all others report zeros and
/// carry the running totals forward unchanged.
pub fn hourly_fuel(allocation: &[AllocatedEnergy], spec: &GeneratorSpec) -> Vec<HourlyFuel> {
    let mut cumulative_liters = 0.0;
    let mut cumulative_cost = 0.0;

    allocation
        .iter()
        .map(|a| {
            let generator_kw = a.generator_kwh;
            let (load_percent, liters_per_hour) = if generator_kw > 0.0 {
                (spec.load_percent(generator_kw), spec.fuel_rate(generator_kw))
            } else {
                (0.0, 0.0)
            };
            let cost = liters_per_hour * spec.fuel_price_per_liter;
            cumulative_liters += liters_per_hour;
            cumulative_cost += cost;
            HourlyFuel {
                hour: a.hour,
                generator_kw,
                load_percent,
                liters_per_hour,
                cost,
                cumulative_liters,
                cumulative_cost,
            }
        })
        .collect()
}

/// Cumulative fuel cost after the first `hours` hours of the day.
///
/// # Errors
///
/// Returns [`EngineError::InvalidParameter`] unless `1 <= hours <= fuel.len()`.
pub fn cost_after_hours(fuel: &[HourlyFuel], hours: usize) -> Result<f64> {
    match hours.checked_sub(1).and_then(|i| fuel.get(i)) {
        Some(h) => Ok(h.cumulative_cost),
        None => Err(EngineError::parameter(
            "hours",
            format!("must be in 1..={}, got {hours}", fuel.len()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::allocator::allocate;

    fn curve() -> EfficiencyCurve {
        EfficiencyCurve::new(vec![
            Breakpoint::new(0.0, 0.0),
            Breakpoint::new(25.0, 2.0),
            Breakpoint::new(50.0, 3.5),
            Breakpoint::new(75.0, 5.0),
            Breakpoint::new(100.0, 6.5),
        ])
        .unwrap()
    }

    fn spec() -> GeneratorSpec {
        GeneratorSpec::new(11.0, 900.0, 850_000.0, curve()).unwrap()
    }

    #[test]
    fn breakpoint_loads_return_literal_rates() {
        let s = spec();
        assert_eq!(fuel_rate(5.5, &s), 3.5);
        assert_eq!(fuel_rate(8.25, &s), 5.0);
        assert_eq!(fuel_rate(11.0, &s), 6.5);
        assert_eq!(fuel_rate(0.0, &s), 0.0);
    }

    #[test]
    fn interpolates_between_breakpoints() {
        // 2.2 kW on 11 kW is 20 %, between (0, 0) and (25, 2).
        assert!((fuel_rate(2.2, &spec()) - 1.6).abs() < 1e-9);
    }

    #[test]
    fn overload_is_capped_at_full_rating() {
        let s = spec();
        assert_eq!(s.load_percent(20.0), 100.0);
        assert_eq!(fuel_rate(20.0, &s), 6.5);
    }

    #[test]
    fn rate_is_non_decreasing_in_load() {
        let s = spec();
        let rates: Vec<f64> = (0..=120).map(|i| fuel_rate(f64::from(i) * 0.1, &s)).collect();
        assert!(rates.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn curve_needs_two_points() {
        let err = EfficiencyCurve::new(vec![Breakpoint::new(0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidEfficiencyCurve(_)));
    }

    #[test]
    fn curve_must_span_zero_to_hundred() {
        let short = vec![Breakpoint::new(0.0, 0.0), Breakpoint::new(90.0, 6.0)];
        assert!(EfficiencyCurve::new(short).is_err());
        let late = vec![Breakpoint::new(10.0, 1.0), Breakpoint::new(100.0, 6.0)];
        assert!(EfficiencyCurve::new(late).is_err());
    }

    #[test]
    fn curve_rejects_unordered_percentages() {
        let points = vec![
            Breakpoint::new(0.0, 0.0),
            Breakpoint::new(50.0, 3.0),
            Breakpoint::new(50.0, 3.5),
            Breakpoint::new(100.0, 6.5),
        ];
        assert!(EfficiencyCurve::new(points).is_err());
    }

    #[test]
    fn curve_rejects_negative_or_falling_rates() {
        let negative = vec![Breakpoint::new(0.0, -0.1), Breakpoint::new(100.0, 6.0)];
        assert!(EfficiencyCurve::new(negative).is_err());
        let falling = vec![
            Breakpoint::new(0.0, 1.0),
            Breakpoint::new(50.0, 4.0),
            Breakpoint::new(100.0, 3.0),
        ];
        assert!(EfficiencyCurve::new(falling).is_err());
    }

    #[test]
    fn generator_spec_rejects_zero_rating() {
        let err = GeneratorSpec::new(0.0, 900.0, 0.0, curve()).unwrap_err();
        assert!(err.to_string().contains("generator.rated_kw"));
        assert!(GeneratorSpec::new(11.0, 0.0, 0.0, curve()).is_err());
    }

    #[test]
    fn only_generator_hours_burn_fuel() {
        let mut available = [true; 24];
        available[12] = false;
        available[13] = false;
        let alloc = allocate(&[5.5; 24], &available, 0.5).unwrap();
        let fuel = hourly_fuel(&alloc, &spec());

        assert_eq!(fuel[11].liters_per_hour, 0.0);
        assert_eq!(fuel[12].liters_per_hour, 3.5);
        assert_eq!(fuel[12].cost, 3150.0);
        assert_eq!(fuel[12].load_percent, 50.0);
        assert_eq!(fuel[23].cumulative_liters, 7.0);
        assert_eq!(fuel[23].cumulative_cost, 6300.0);
    }

    #[test]
    fn running_totals_are_monotone() {
        let alloc = allocate(&[2.2; 24], &[false; 24], 0.0).unwrap();
        let fuel = hourly_fuel(&alloc, &spec());
        assert!(fuel.windows(2).all(|w| w[1].cumulative_cost >= w[0].cumulative_cost));
        let total: f64 = fuel.iter().map(|h| h.liters_per_hour).sum();
        assert!((fuel[23].cumulative_liters - total).abs() < 1e-9);
    }

    #[test]
    fn cost_checkpoint_reads_running_sum() {
        let alloc = allocate(&[5.5; 24], &[false; 24], 0.0).unwrap();
        let fuel = hourly_fuel(&alloc, &spec());
        assert_eq!(cost_after_hours(&fuel, 1).unwrap(), 3150.0);
        assert_eq!(cost_after_hours(&fuel, 2).unwrap(), 6300.0);
        assert!(cost_after_hours(&fuel, 0).is_err());
        assert!(cost_after_hours(&fuel, 25).is_err());
    }
}
