use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::household::types::{HOURS_PER_DAY, HourSet, LoadProfile};

/// Replaces the load of a single hour with an absolute value.
///
/// Used for activity tables such as "06:00 water heater + iron = 4.3 kW",
/// where the listed value already includes the always-on base load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodOverride {
    /// Hour of day, `0..24`.
    pub hour: usize,
    /// Load for that hour (kW).
    pub kw: f64,
}

/// Adds a load delta on top of whatever the hours already hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdditiveLayer {
    /// Short description, e.g. `"living room AC"`.
    #[serde(default)]
    pub label: String,
    /// Hours the delta applies to, possibly wrapping past midnight.
    pub hours: HourSet,
    /// Load added to each of those hours (kW, may be negative).
    pub delta_kw: f64,
}

impl AdditiveLayer {
    pub fn new(label: &str, hours: HourSet, delta_kw: f64) -> Self {
        Self {
            label: label.to_string(),
            hours,
            delta_kw,
        }
    }
}

/// Declarative description of a household's daily demand.
///
/// The profile is built in a fixed order so the result never depends on the
/// order entries appear in a configuration file:
///
/// 1. every hour starts at `base_kw`,
/// 2. overrides replace single hours, applied by ascending hour,
/// 3. layers add their delta, applied in the order declared.
///
/// # Examples
///
/// ```
/// use backup_power_sim::household::profile::{AdditiveLayer, PeriodOverride, ProfilePlan};
/// use backup_power_sim::household::types::HourSet;
///
/// let plan = ProfilePlan {
///     base_kw: 0.25,
///     overrides: vec![PeriodOverride { hour: 19, kw: 2.5 }],
///     layers: vec![AdditiveLayer::new("evening AC", HourSet::range(19, 21), 1.0)],
/// };
/// let profile = plan.build().unwrap();
/// assert_eq!(profile.load_at(19), Some(3.5));
/// assert_eq!(profile.load_at(20), Some(1.25));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilePlan {
    /// Always-on load present in every hour (kW).
    pub base_kw: f64,
    /// Per-hour replacement values.
    #[serde(default)]
    pub overrides: Vec<PeriodOverride>,
    /// Deltas superimposed after the overrides.
    #[serde(default)]
    pub layers: Vec<AdditiveLayer>,
}

impl ProfilePlan {
    /// A plan whose overrides spell out every hour of `hourly_kw`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IncompleteSchedule`] unless the table has
    /// exactly 24 entries.
    pub fn from_hourly_table(base_kw: f64, hourly_kw: &[f64]) -> Result<Self> {
        let table: &[f64; HOURS_PER_DAY] = hourly_kw.try_into().map_err(|_| {
            EngineError::IncompleteSchedule(format!(
                "expected {HOURS_PER_DAY} hourly loads, got {}",
                hourly_kw.len()
            ))
        })?;
        Ok(Self {
            base_kw,
            overrides: hourly_overrides(table),
            layers: Vec::new(),
        })
    }

    /// Builds the 24-hour load curve.
    ///
    /// # Errors
    ///
    /// See [`build_profile`].
    pub fn build(&self) -> Result<LoadProfile> {
        build_profile(self.base_kw, &self.overrides, &self.layers)
    }
}

/// One override per hour, taken from a full-day table.
pub fn hourly_overrides(table: &[f64; HOURS_PER_DAY]) -> Vec<PeriodOverride> {
    table
        .iter()
        .enumerate()
        .map(|(hour, &kw)| PeriodOverride { hour, kw })
        .collect()
}

/// Combines a base load with period overrides and additive layers.
///
/// # Arguments
///
/// * `base_kw` - Load every hour starts from (kW)
/// * `overrides` - Replacement values, applied by ascending hour
/// * `layers` - Deltas, applied in declaration order after all overrides
///
/// # Errors
///
/// * [`EngineError::IncompleteSchedule`] if an override or layer names an
///   hour outside `0..24`.
/// * [`EngineError::InvalidParameter`] if two overrides name the same hour.
/// * [`EngineError::NegativeLoad`] if any resulting hour is negative or not
///   finite.
pub fn build_profile(
    base_kw: f64,
    overrides: &[PeriodOverride],
    layers: &[AdditiveLayer],
) -> Result<LoadProfile> {
    let mut hourly_kw = [base_kw; HOURS_PER_DAY];

    let mut ordered: Vec<&PeriodOverride> = overrides.iter().collect();
    ordered.sort_by_key(|o| o.hour);
    for pair in ordered.windows(2) {
        if pair[0].hour == pair[1].hour {
            return Err(EngineError::parameter(
                "profile.overrides",
                format!("hour {} is overridden more than once", pair[0].hour),
            ));
        }
    }

    for o in ordered {
        let slot = hourly_kw.get_mut(o.hour).ok_or_else(|| {
            EngineError::IncompleteSchedule(format!("override hour {} is outside 0..24", o.hour))
        })?;
        *slot = o.kw;
    }

    for layer in layers {
        if let Some(hour) = layer.hours.first_out_of_range() {
            return Err(EngineError::IncompleteSchedule(format!(
                "layer `{}` hour {hour} is outside 0..24",
                layer.label
            )));
        }
        for &hour in layer.hours.hours() {
            hourly_kw[hour] += layer.delta_kw;
        }
        debug!(label = %layer.label, delta_kw = layer.delta_kw, "applied load layer");
    }

    LoadProfile::from_hourly_kw(&hourly_kw)
}
