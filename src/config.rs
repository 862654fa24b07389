//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::{EngineError, Result};
use crate::household::appliance::{ApplianceRecord, compute_daily_energy};
use crate::household::profile::{AdditiveLayer, PeriodOverride, ProfilePlan, hourly_overrides};
use crate::household::types::{HOURS_PER_DAY, HourSet};
use crate::sim::economics::OperationalAssumptions;
use crate::sim::fuel::{Breakpoint, EfficiencyCurve, GeneratorSpec};
use crate::sim::grid::GridSchedule;
use crate::sim::sensitivity::SweepRange;
use crate::sim::tariff::Tariff;

/// Top-level scenario configuration parsed from TOML.
///
/// All sections default to the Abuja scenario. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::baseline`]
/// for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Name shown in reports.
    #[serde(default = "default_name")]
    pub name: String,
    /// Appliance catalog.
    #[serde(default)]
    pub household: HouseholdConfig,
    /// Hourly load curve construction.
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Grid outage schedule.
    #[serde(default)]
    pub grid: GridConfig,
    /// Generator start policy.
    #[serde(default)]
    pub allocation: AllocationConfig,
    /// Generator rating, prices and efficiency curve.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Maintenance, depreciation and fuel properties.
    #[serde(default)]
    pub operations: OperationalAssumptions,
    /// Flat supply tariffs.
    #[serde(default)]
    pub tariff: Tariff,
    /// Fuel price sweep bounds.
    #[serde(default)]
    pub sensitivity: SweepRange,
}

fn default_name() -> String {
    "abuja".to_string()
}

/// Appliance catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseholdConfig {
    pub appliances: Vec<ApplianceRecord>,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        let a = ApplianceRecord::new;
        Self {
            appliances: vec![
                a("Refrigerator", 1, 150.0, 24.0, "24/7 cycling"),
                a("Split_AC_Living", 1, 1500.0, 5.0, "Evenings 19-23"),
                a("Split_AC_Bedroom1", 1, 1200.0, 4.0, "Night 22-02"),
                a("Split_AC_Bedroom2", 1, 1200.0, 4.0, "Night 22-02"),
                a("Ceiling_Fan", 4, 60.0, 10.0, "Day & evening"),
                a("LED_TV", 2, 80.0, 5.0, "Evening 19-22"),
                a("Laptop", 3, 60.0, 6.0, "Day & night"),
                a("Desktop_PC", 1, 150.0, 3.0, "Afternoon"),
                a("Smartphones", 5, 10.0, 3.0, "Morning & night"),
                a("Router_Modem", 1, 10.0, 24.0, "24/7"),
                a("Microwave", 1, 1000.0, 0.5, "Morning & evening"),
                a("Electric_Iron", 1, 1200.0, 0.5, "Morning"),
                a("Water_Heater", 1, 3000.0, 0.5, "Morning"),
                a("Washing_Machine", 1, 500.0, 0.14, "Weekly avg"),
                a("Lighting_LED", 10, 10.0, 6.0, "Evening"),
                a("Blender", 1, 300.0, 0.5, "Morning"),
            ],
        }
    }
}

/// Hourly load curve: base load, per-hour overrides and additive layers.
///
/// A missing `[profile]` section is the Abuja curve. Inside a written
/// section, omitted `overrides` and `layers` are empty, so `base_kw` alone
/// describes a flat day.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// Always-on load (kW).
    #[serde(default = "default_base_kw")]
    pub base_kw: f64,
    /// Absolute per-hour loads (kW) replacing the base load.
    #[serde(default)]
    pub overrides: Vec<PeriodOverride>,
    /// Deltas applied after the overrides, in order.
    #[serde(default)]
    pub layers: Vec<AdditiveLayer>,
}

fn default_base_kw() -> f64 {
    0.16
}

/// Abuja activity table, hours 0-23 (kW).
const ABUJA_ACTIVITY_KW: [f64; HOURS_PER_DAY] = [
    0.24, 0.24, 0.24, 0.24, 0.24, 0.24, 4.3, 1.3, 0.6, 0.7, 0.7, 0.8, 1.2, 1.5, 1.5, 1.5, 1.8,
    2.0, 2.5, 3.8, 4.0, 3.5, 3.2, 0.6,
];

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            base_kw: default_base_kw(),
            overrides: hourly_overrides(&ABUJA_ACTIVITY_KW),
            layers: vec![
                AdditiveLayer::new("living room AC", HourSet::range(19, 23), 1.0),
                AdditiveLayer::new("bedroom ACs", HourSet::wrapping(22, 4), 1.8),
            ],
        }
    }
}

impl ProfileConfig {
    pub fn to_plan(&self) -> ProfilePlan {
        ProfilePlan {
            base_kw: self.base_kw,
            overrides: self.overrides.clone(),
            layers: self.layers.clone(),
        }
    }
}

/// Grid schedule, either as outage hours or as 24 availability flags.
///
/// When `availability` is given it takes precedence over `outage_hours`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Hours (0-23) with the grid down.
    pub outage_hours: Vec<usize>,
    /// One flag per hour, `true` when the grid is up.
    pub availability: Option<Vec<bool>>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            outage_hours: vec![0, 1, 3, 4, 5, 12, 13, 19, 20, 21, 22],
            availability: None,
        }
    }
}

impl GridConfig {
    /// # Errors
    ///
    /// Returns [`EngineError::IncompleteSchedule`] for a flag table that is
    /// not 24 long or an outage hour outside `0..24`.
    pub fn to_schedule(&self) -> Result<GridSchedule> {
        match &self.availability {
            Some(flags) => GridSchedule::from_flags(flags),
            None => GridSchedule::from_outage_hours(&self.outage_hours),
        }
    }
}

/// Generator start policy during outages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllocationConfig {
    /// The generator starts only for loads strictly above this (kW).
    pub generator_threshold_kw: f64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            generator_threshold_kw: 0.5,
        }
    }
}

impl AllocationConfig {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] for a negative or
    /// non-finite threshold.
    pub fn validate(&self) -> Result<()> {
        let t = self.generator_threshold_kw;
        if !t.is_finite() || t < 0.0 {
            return Err(EngineError::parameter(
                "allocation.generator_threshold_kw",
                "must be a finite value >= 0",
            ));
        }
        Ok(())
    }
}

/// Backup generator parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Rated output (kW, must be > 0).
    pub rated_kw: f64,
    /// Fuel price (NGN/L).
    pub fuel_price_per_liter: f64,
    /// Purchase price (NGN).
    pub purchase_price: f64,
    /// Efficiency curve from 0 % to 100 % load.
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rated_kw: 11.0,
            fuel_price_per_liter: 900.0,
            purchase_price: 850_000.0,
            breakpoints: vec![
                Breakpoint::new(0.0, 0.0),
                Breakpoint::new(25.0, 2.0),
                Breakpoint::new(50.0, 3.5),
                Breakpoint::new(75.0, 5.0),
                Breakpoint::new(100.0, 6.5),
            ],
        }
    }
}

impl GeneratorConfig {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidEfficiencyCurve`] or
    /// [`EngineError::InvalidParameter`] when the curve or prices are out of
    /// bounds.
    pub fn to_spec(&self) -> Result<GeneratorSpec> {
        let curve = EfficiencyCurve::new(self.breakpoints.clone())?;
        GeneratorSpec::new(
            self.rated_kw,
            self.fuel_price_per_liter,
            self.purchase_price,
            curve,
        )
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"generator.rated_kw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn from_engine(section: &str, err: EngineError) -> Self {
        match err {
            EngineError::InvalidParameter { field, reason } => Self {
                field,
                message: reason,
            },
            other => Self {
                field: section.to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl ScenarioConfig {
    /// Abuja household on an unreliable grid with an 11 kW petrol generator.
    pub fn baseline() -> Self {
        Self {
            name: default_name(),
            household: HouseholdConfig::default(),
            profile: ProfileConfig::default(),
            grid: GridConfig::default(),
            allocation: AllocationConfig::default(),
            generator: GeneratorConfig::default(),
            operations: OperationalAssumptions::default(),
            tariff: Tariff::default(),
            sensitivity: SweepRange::default(),
        }
    }

    /// Lagos household with a four-hour evening outage; the generator takes
    /// any load during the outage.
    pub fn lagos() -> Self {
        let a = ApplianceRecord::new;
        let mut table = [0.50; 24];
        table[..5].fill(0.62);
        for (hour, kw) in [
            (5, 0.65),
            (6, 2.85),
            (7, 2.15),
            (16, 0.85),
            (17, 0.95),
            (18, 1.55),
            (19, 2.65),
            (20, 2.45),
            (21, 1.85),
            (22, 1.15),
            (23, 0.62),
        ] {
            table[hour] = kw;
        }

        Self {
            name: "lagos".to_string(),
            household: HouseholdConfig {
                appliances: vec![
                    a("Refrigerator", 1, 150.0, 24.0, "Continuous operation"),
                    a("Freezer", 1, 200.0, 18.0, "Continuous operation"),
                    a("Air Conditioner", 1, 1500.0, 3.0, "Evening use (7-10 PM)"),
                    a("Ceiling Fans", 5, 60.0, 12.0, "Multiple rooms"),
                    a("Standing Fans", 2, 45.0, 8.0, "Living and bedrooms"),
                    a("Television", 1, 50.0, 5.0, "Evening entertainment"),
                    a("DSTV Decoder", 1, 15.0, 5.0, "With television"),
                    a("Laptops", 2, 60.0, 4.0, "Work and study"),
                    a("Smartphones", 5, 10.0, 2.0, "Evening charging"),
                    a("WiFi Router", 1, 10.0, 24.0, "Continuous operation"),
                    a("Microwave", 1, 800.0, 0.5, "Evening meal preparation"),
                    a("Electric Kettle", 1, 1500.0, 0.25, "Morning and evening"),
                    a("Electric Iron", 1, 1000.0, 0.33, "Morning preparation"),
                    a("Water Heater", 1, 2000.0, 0.5, "Morning showers"),
                    a("LED Lighting", 8, 10.0, 5.0, "Evening illumination"),
                    a("Blender", 1, 300.0, 0.25, "Morning preparation"),
                    a("Washing Machine", 1, 400.0, 0.5, "Weekly average"),
                    a("Audio System", 1, 30.0, 2.0, "Entertainment"),
                ],
            },
            profile: ProfileConfig {
                base_kw: 0.35,
                overrides: hourly_overrides(&table),
                layers: vec![AdditiveLayer::new(
                    "evening activity",
                    HourSet::range(18, 23),
                    0.15,
                )],
            },
            grid: GridConfig {
                outage_hours: vec![19, 20, 21, 22],
                availability: None,
            },
            allocation: AllocationConfig {
                generator_threshold_kw: 0.0,
            },
            tariff: Tariff {
                grid_per_kwh: 110.0,
                generator_per_kwh: 315.0,
            },
            ..Self::baseline()
        }
    }

    /// Generator-only day: the grid is down every hour and the generator
    /// carries the whole household load.
    pub fn continuous() -> Self {
        const TABLE: [f64; 24] = [
            0.45, 0.45, 0.45, 0.45, 0.45, 0.45, 2.20, 3.50, 1.80, 0.80, 0.65, 0.65, 0.65, 1.80,
            1.40, 0.90, 0.80, 1.60, 1.40, 2.80, 3.20, 2.40, 2.10, 1.50,
        ];

        Self {
            name: "continuous".to_string(),
            household: HouseholdConfig {
                appliances: Vec::new(),
            },
            profile: ProfileConfig {
                base_kw: 0.45,
                overrides: hourly_overrides(&TABLE),
                layers: Vec::new(),
            },
            grid: GridConfig {
                outage_hours: (0..24).collect(),
                availability: None,
            },
            allocation: AllocationConfig {
                generator_threshold_kw: 0.0,
            },
            tariff: Tariff {
                grid_per_kwh: 110.0,
                generator_per_kwh: 150.0,
            },
            ..Self::baseline()
        }
    }

    /// Urban household whose grid fails over the evening peak, 18:00-21:00.
    pub fn evening() -> Self {
        const TABLE: [f64; HOURS_PER_DAY] = [
            0.4, 0.4, 0.4, 0.4, 0.4, 1.8, 2.5, 1.2, 0.6, 0.5, 0.5, 0.5, 1.5, 1.0, 0.7, 0.6, 1.3,
            1.0, 2.2, 2.5, 2.0, 1.8, 1.2, 0.5,
        ];

        Self {
            name: "evening".to_string(),
            household: HouseholdConfig {
                appliances: Vec::new(),
            },
            profile: ProfileConfig {
                base_kw: 0.4,
                overrides: hourly_overrides(&TABLE),
                layers: Vec::new(),
            },
            grid: GridConfig {
                outage_hours: vec![18, 19, 20, 21],
                availability: None,
            },
            tariff: Tariff {
                grid_per_kwh: 50.0,
                generator_per_kwh: 150.0,
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["abuja", "lagos", "continuous", "evening"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> std::result::Result<Self, ConfigError> {
        match name {
            "abuja" => Ok(Self::baseline()),
            "lagos" => Ok(Self::lagos()),
            "continuous" => Ok(Self::continuous()),
            "evening" => Ok(Self::evening()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates every section and returns one error per failing section.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let checks = [
            (
                "household.appliances",
                compute_daily_energy(&self.household.appliances).map(drop),
            ),
            ("profile", self.profile.to_plan().build().map(drop)),
            ("grid", self.grid.to_schedule().map(drop)),
            ("allocation", self.allocation.validate()),
            ("generator", self.generator.to_spec().map(drop)),
            ("operations", self.operations.validate()),
            ("tariff", self.tariff.validate()),
            ("sensitivity", self.sensitivity.validate()),
        ];

        checks
            .into_iter()
            .filter_map(|(section, res)| res.err().map(|e| ConfigError::from_engine(section, e)))
            .collect()
    }
}
