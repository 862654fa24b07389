//! Descriptive statistics of the daily load curve.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::household::types::LoadProfile;
use crate::sim::report::or_na;

/// Hours counted as the evening block for demand concentration.
pub const EVENING_HOURS: RangeInclusive<usize> = 18..=23;

/// Coarse time-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayPeriod {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 4] = [
        DayPeriod::Night,
        DayPeriod::Morning,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
    ];

    pub fn hours(self) -> RangeInclusive<usize> {
        match self {
            DayPeriod::Night => 0..=6,
            DayPeriod::Morning => 7..=12,
            DayPeriod::Afternoon => 13..=18,
            DayPeriod::Evening => 19..=23,
        }
    }

    pub fn of_hour(hour: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.hours().contains(&hour))
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, hours) = (format!("{self:?}"), self.hours());
        write!(f, "{name} ({:02}-{:02})", hours.start(), hours.end())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodAverage {
    pub period: DayPeriod,
    pub average_kw: f64,
}

/// Shape of a day's demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadInsights {
    pub peak_hour: usize,
    pub peak_kw: f64,
    pub min_kw: f64,
    pub period_averages: Vec<PeriodAverage>,
    /// Hourly loads sorted from highest to lowest.
    pub duration_curve: Vec<f64>,
    /// Fraction of daily energy drawn in [`EVENING_HOURS`].
    pub evening_share: Option<f64>,
    pub peak_to_base: Option<f64>,
}

impl LoadInsights {
    pub fn from_profile(profile: &LoadProfile) -> Self {
        let loads = profile.loads_kw();
        let peak = profile.peak();
        let min_kw = loads.iter().copied().fold(f64::INFINITY, f64::min);
        let min_kw = if min_kw.is_finite() { min_kw } else { 0.0 };

        let period_averages = DayPeriod::ALL
            .into_iter()
            .map(|period| {
                let hours = period.hours();
                let n = hours.clone().count() as f64;
                let sum: f64 = hours.filter_map(|h| loads.get(h)).sum();
                PeriodAverage {
                    period,
                    average_kw: sum / n,
                }
            })
            .collect();

        let mut duration_curve = loads.clone();
        duration_curve.sort_by(|a, b| b.total_cmp(a));

        let daily: f64 = loads.iter().sum();
        let evening: f64 = EVENING_HOURS.filter_map(|h| loads.get(h)).sum();

        Self {
            peak_hour: peak.hour,
            peak_kw: peak.load_kw,
            min_kw,
            period_averages,
            duration_curve,
            evening_share: (daily > 0.0).then(|| evening / daily),
            peak_to_base: (min_kw > 0.0).then(|| peak.load_kw / min_kw),
        }
    }

    pub fn average_for(&self, period: DayPeriod) -> Option<f64> {
        self.period_averages
            .iter()
            .find(|p| p.period == period)
            .map(|p| p.average_kw)
    }
}

impl fmt::Display for LoadInsights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Load Insights ---")?;
        writeln!(
            f,
            "Peak hour:             {:02}:00 ({:.2} kW)",
            self.peak_hour, self.peak_kw
        )?;
        writeln!(f, "Minimum load:          {:.2} kW", self.min_kw)?;
        for p in &self.period_averages {
            writeln!(f, "{:<23}{:.2} kW", format!("{}:", p.period), p.average_kw)?;
        }
        writeln!(
            f,
            "Evening share:         {}",
            or_na(self.evening_share.map(|s| s * 100.0), 1, "%")
        )?;
        write!(
            f,
            "Peak-to-base ratio:    {}",
            or_na(self.peak_to_base, 1, "x")
        )
    }
}
