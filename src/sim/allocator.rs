//! Hourly energy-source allocation between grid, generator and unserved demand.

use std::fmt;

use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::household::types::HOURS_PER_DAY;

/// Where an hour's demand was supplied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplySource {
    Grid,
    Generator,
    Unserved,
}

impl fmt::Display for SupplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Grid => "grid",
            Self::Generator => "generator",
            Self::Unserved => "unserved",
        })
    }
}

/// Energy supplied during one hour, split by source.
///
/// Exactly one source takes the whole hour, so at most one of the three
/// energy fields is non-zero and their sum equals the hour's load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocatedEnergy {
    pub hour: usize,
    pub source: SupplySource,
    pub grid_kwh: f64,
    pub generator_kwh: f64,
    pub unserved_kwh: f64,
}

impl AllocatedEnergy {
    fn assign(hour: usize, source: SupplySource, load_kwh: f64) -> Self {
        let share = |s: SupplySource| if s == source { load_kwh } else { 0.0 };
        Self {
            hour,
            source,
            grid_kwh: share(SupplySource::Grid),
            generator_kwh: share(SupplySource::Generator),
            unserved_kwh: share(SupplySource::Unserved),
        }
    }

    /// The hour's full demand (kWh).
    pub fn total_kwh(&self) -> f64 {
        self.grid_kwh + self.generator_kwh + self.unserved_kwh
    }

    pub fn generator_ran(&self) -> bool {
        self.source == SupplySource::Generator
    }
}

/// Assigns each hour's load to grid, generator or unserved.
///
/// Per hour:
/// - grid up: the whole load is grid energy;
/// - grid down and load strictly above `generator_threshold_kw`: the
///   generator is started and supplies the whole load;
/// - otherwise the load is unserved (too small to justify starting the
///   generator).
///
/// # Arguments
///
/// * `load_kw` - Hourly load, 24 values in hour order
/// * `available` - Grid availability, 24 flags in hour order
/// * `generator_threshold_kw` - Minimum load that starts the generator (exclusive)
///
/// # Errors
///
/// * [`EngineError::ProfileLengthMismatch`] if the sequences differ in
///   length or are not 24 long.
/// * [`EngineError::InvalidParameter`] if the threshold is negative or not
///   finite.
pub fn allocate(
    load_kw: &[f64],
    available: &[bool],
    generator_threshold_kw: f64,
) -> Result<Vec<AllocatedEnergy>> {
    if load_kw.len() != available.len() || load_kw.len() != HOURS_PER_DAY {
        return Err(EngineError::ProfileLengthMismatch {
            load_len: load_kw.len(),
            availability_len: available.len(),
        });
    }
    if !generator_threshold_kw.is_finite() || generator_threshold_kw < 0.0 {
        return Err(EngineError::parameter(
            "allocation.generator_threshold_kw",
            "must be a finite value >= 0",
        ));
    }

    let allocation = load_kw
        .iter()
        .zip(available)
        .enumerate()
        .map(|(hour, (&load, &grid_up))| {
            let source = if grid_up {
                SupplySource::Grid
            } else if load > generator_threshold_kw {
                SupplySource::Generator
            } else {
                SupplySource::Unserved
            };
            AllocatedEnergy::assign(hour, source, load)
        })
        .collect();

    Ok(allocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags_with_outages(outages: &[usize]) -> Vec<bool> {
        (0..24).map(|h| !outages.contains(&h)).collect()
    }

    #[test]
    fn grid_hours_take_the_whole_load() {
        let alloc = allocate(&[1.5; 24], &[true; 24], 0.5).unwrap();
        assert!(alloc.iter().all(|a| a.grid_kwh == 1.5 && a.source == SupplySource::Grid));
    }

    #[test]
    fn outage_above_threshold_runs_generator() {
        let alloc = allocate(&[1.2; 24], &flags_with_outages(&[12]), 0.5).unwrap();
        assert_eq!(alloc[12].source, SupplySource::Generator);
        assert_eq!(alloc[12].generator_kwh, 1.2);
        assert_eq!(alloc[12].grid_kwh, 0.0);
        assert!(alloc[12].generator_ran());
    }

    #[test]
    fn outage_below_threshold_is_unserved() {
        let alloc = allocate(&[0.24; 24], &flags_with_outages(&[3]), 0.5).unwrap();
        assert_eq!(alloc[3].source, SupplySource::Unserved);
        assert_eq!(alloc[3].unserved_kwh, 0.24);
        assert_eq!(alloc[3].generator_kwh, 0.0);
    }

    #[test]
    fn load_exactly_at_threshold_does_not_start_generator() {
        let alloc = allocate(&[0.5; 24], &[false; 24], 0.5).unwrap();
        assert!(alloc.iter().all(|a| a.source == SupplySource::Unserved));
    }

    #[test]
    fn zero_threshold_starts_generator_for_any_positive_load() {
        let mut load = [0.45; 24];
        load[0] = 0.0;
        let alloc = allocate(&load, &[false; 24], 0.0).unwrap();
        assert_eq!(alloc[0].source, SupplySource::Unserved);
        assert!(alloc[1..].iter().all(AllocatedEnergy::generator_ran));
    }

    #[test]
    fn every_hour_conserves_energy() {
        let load: Vec<f64> = (0..24).map(|h| f64::from(h) * 0.2).collect();
        let alloc = allocate(&load, &flags_with_outages(&[1, 2, 3, 18, 19]), 0.5).unwrap();
        for (a, &l) in alloc.iter().zip(&load) {
            assert!((a.total_kwh() - l).abs() < 1e-9);
        }
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = allocate(&[1.0; 24], &[true; 23], 0.5).unwrap_err();
        assert_eq!(
            err,
            EngineError::ProfileLengthMismatch {
                load_len: 24,
                availability_len: 23
            }
        );
    }

    #[test]
    fn equal_but_short_lengths_are_rejected() {
        assert!(allocate(&[1.0; 12], &[true; 12], 0.5).is_err());
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let err = allocate(&[1.0; 24], &[true; 24], -0.1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }
}
