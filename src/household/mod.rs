//! Household demand modelling: appliance catalog and hourly load curve.

/// Appliance catalog and daily energy rollup.
pub mod appliance;
/// Hourly load profile construction from base load, overrides and layers.
pub mod profile;
pub mod types;

pub use appliance::{ApplianceInventory, ApplianceRecord, compute_daily_energy};
pub use profile::{AdditiveLayer, PeriodOverride, ProfilePlan, build_profile, hourly_overrides};
pub use types::{HOURS_PER_DAY, HourSet, HourlyLoadPoint, LoadProfile};
