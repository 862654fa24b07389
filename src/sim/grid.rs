use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::household::types::HOURS_PER_DAY;

/// Hour-by-hour grid availability over one day.
///
/// Authored independently of the load profile, either as 24 explicit flags
/// or as the set of outage hours.
///
/// # Examples
///
/// ```
/// use backup_power_sim::sim::grid::GridSchedule;
///
/// let grid = GridSchedule::from_outage_hours(&[19, 20, 21, 22]).unwrap();
/// assert!(grid.is_available(18));
/// assert!(!grid.is_available(19));
/// assert_eq!(grid.outage_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GridSchedule {
    available: [bool; HOURS_PER_DAY],
}

impl GridSchedule {
    /// Builds a schedule from one availability flag per hour.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IncompleteSchedule`] unless exactly 24 flags
    /// are supplied.
    pub fn from_flags(flags: &[bool]) -> Result<Self> {
        let available: [bool; HOURS_PER_DAY] = flags.try_into().map_err(|_| {
            EngineError::IncompleteSchedule(format!(
                "expected {HOURS_PER_DAY} availability flags, got {}",
                flags.len()
            ))
        })?;
        Ok(Self { available })
    }

    /// Builds a schedule where the grid is down exactly in `outage_hours`.
    ///
    /// Repeated hours are harmless.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IncompleteSchedule`] if an hour is outside `0..24`.
    pub fn from_outage_hours(outage_hours: &[usize]) -> Result<Self> {
        let mut available = [true; HOURS_PER_DAY];
        for &hour in outage_hours {
            let slot = available.get_mut(hour).ok_or_else(|| {
                EngineError::IncompleteSchedule(format!("outage hour {hour} is outside 0..24"))
            })?;
            *slot = false;
        }
        Ok(Self { available })
    }

    pub fn always_up() -> Self {
        Self {
            available: [true; HOURS_PER_DAY],
        }
    }

    pub fn always_down() -> Self {
        Self {
            available: [false; HOURS_PER_DAY],
        }
    }

    /// Whether the grid supplies power during `hour`.
    ///
    /// Hours outside `0..24` are reported as unavailable.
    pub fn is_available(&self, hour: usize) -> bool {
        self.available.get(hour).copied().unwrap_or(false)
    }

    pub fn flags(&self) -> &[bool] {
        &self.available
    }

    /// Hours with the grid down, ascending.
    pub fn outage_hours(&self) -> Vec<usize> {
        (0..HOURS_PER_DAY).filter(|&h| !self.available[h]).collect()
    }

    pub fn outage_count(&self) -> usize {
        self.available.iter().filter(|&&up| !up).count()
    }
}
