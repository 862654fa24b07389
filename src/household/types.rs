//! Common types for hourly household demand.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Number of one-hour intervals in the analysed day.
pub const HOURS_PER_DAY: usize = 24;

/// Demand during one wall-clock hour.
///
/// With one-hour intervals the load in kW equals the energy in kWh drawn
/// during that hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyLoadPoint {
    /// Hour of day, `0..24`.
    pub hour: usize,
    /// Average demand over the hour (kW, non-negative).
    pub load_kw: f64,
}

/// A complete 24-hour load curve, one point per hour in hour order.
///
/// The only ways to obtain a `LoadProfile` validate the length and sign of
/// every point, so downstream stages can rely on both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LoadProfile {
    points: Vec<HourlyLoadPoint>,
}

impl LoadProfile {
    /// Builds a profile from 24 hourly load values.
    ///
    /// # Errors
    ///
    /// * [`EngineError::IncompleteSchedule`] if `loads_kw` does not hold
    ///   exactly 24 values.
    /// * [`EngineError::NegativeLoad`] if any value is negative or not finite.
    pub fn from_hourly_kw(loads_kw: &[f64]) -> Result<Self> {
        if loads_kw.len() != HOURS_PER_DAY {
            return Err(EngineError::IncompleteSchedule(format!(
                "expected {HOURS_PER_DAY} hourly loads, got {}",
                loads_kw.len()
            )));
        }

        let points = loads_kw
            .iter()
            .enumerate()
            .map(|(hour, &load_kw)| {
                if load_kw.is_finite() && load_kw >= 0.0 {
                    Ok(HourlyLoadPoint { hour, load_kw })
                } else {
                    Err(EngineError::NegativeLoad { hour, load_kw })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { points })
    }

    /// A profile with zero demand in every hour.
    pub fn zero() -> Self {
        Self {
            points: (0..HOURS_PER_DAY)
                .map(|hour| HourlyLoadPoint { hour, load_kw: 0.0 })
                .collect(),
        }
    }

    pub fn points(&self) -> &[HourlyLoadPoint] {
        &self.points
    }

    /// Hourly loads in hour order.
    pub fn loads_kw(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.load_kw).collect()
    }

    /// Load at `hour`, or `None` outside `0..24`.
    pub fn load_at(&self, hour: usize) -> Option<f64> {
        self.points.get(hour).map(|p| p.load_kw)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total energy over the day (kWh).
    pub fn daily_energy_kwh(&self) -> f64 {
        self.points.iter().map(|p| p.load_kw).sum()
    }

    /// Highest hourly load and the first hour at which it occurs.
    pub fn peak(&self) -> HourlyLoadPoint {
        self.points
            .iter()
            .copied()
            .fold(HourlyLoadPoint { hour: 0, load_kw: 0.0 }, |best, p| {
                if p.load_kw > best.load_kw { p } else { best }
            })
    }
}

/// An ordered set of hours an adjustment applies to.
///
/// Hours are kept in declaration order and may wrap past midnight, e.g.
/// `[22, 23, 0, 1]` for a night-time appliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourSet(Vec<usize>);

impl HourSet {
    pub fn new(hours: Vec<usize>) -> Self {
        Self(hours)
    }

    /// Hours `start..end`, half-open, without wrapping.
    pub fn range(start: usize, end: usize) -> Self {
        Self((start..end).collect())
    }

    /// `count` consecutive hours starting at `start`, wrapping at midnight.
    pub fn wrapping(start: usize, count: usize) -> Self {
        Self((0..count).map(|i| (start + i) % HOURS_PER_DAY).collect())
    }

    pub fn hours(&self) -> &[usize] {
        &self.0
    }

    /// First hour outside `0..24`, if any.
    pub fn first_out_of_range(&self) -> Option<usize> {
        self.0.iter().copied().find(|&h| h >= HOURS_PER_DAY)
    }
}
