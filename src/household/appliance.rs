use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::household::types::HOURS_PER_DAY;

/// One line of the household appliance catalog.
///
/// Records are read once from scenario configuration and never mutated.
///
/// # Examples
///
/// ```
/// use backup_power_sim::household::appliance::ApplianceRecord;
///
/// let fridge = ApplianceRecord::new("Refrigerator", 1, 150.0, 24.0, "24/7 cycling");
/// assert_eq!(fridge.daily_energy_wh(), 3600.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceRecord {
    /// Appliance name, used as the row key in exports.
    pub name: String,
    /// Number of identical units (must be > 0).
    pub quantity: u32,
    /// Rated power of a single unit (W).
    pub rated_power_w: f64,
    /// Hours of use per day, `0..=24`.
    pub daily_hours: f64,
    /// Free-text description of when the appliance runs.
    #[serde(default)]
    pub usage_pattern: String,
}

impl ApplianceRecord {
    pub fn new(
        name: &str,
        quantity: u32,
        rated_power_w: f64,
        daily_hours: f64,
        usage_pattern: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            rated_power_w,
            daily_hours,
            usage_pattern: usage_pattern.to_string(),
        }
    }

    /// Combined power of all units (W).
    pub fn total_power_w(&self) -> f64 {
        f64::from(self.quantity) * self.rated_power_w
    }

    /// Energy drawn per day by all units (Wh).
    pub fn daily_energy_wh(&self) -> f64 {
        self.total_power_w() * self.daily_hours
    }

    /// Checks the record against its field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRecord`] naming the first violated field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| EngineError::InvalidRecord {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.quantity == 0 {
            return Err(invalid("quantity must be > 0"));
        }
        if !self.rated_power_w.is_finite() || self.rated_power_w < 0.0 {
            return Err(invalid("rated power must be a finite value >= 0 W"));
        }
        if !self.daily_hours.is_finite() || !(0.0..=HOURS_PER_DAY as f64).contains(&self.daily_hours)
        {
            return Err(invalid("daily hours must be in [0, 24]"));
        }
        Ok(())
    }
}

/// An appliance record annotated with its derived power and energy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplianceEnergy {
    #[serde(flatten)]
    pub record: ApplianceRecord,
    pub total_power_w: f64,
    pub daily_energy_wh: f64,
}

impl ApplianceEnergy {
    pub fn daily_energy_kwh(&self) -> f64 {
        self.daily_energy_wh / 1000.0
    }
}

/// Appliance catalog with per-appliance and aggregate daily energy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplianceInventory {
    pub appliances: Vec<ApplianceEnergy>,
    /// Sum of all appliances' daily energy (Wh).
    pub total_daily_energy_wh: f64,
    /// Sum of all appliances' combined power (W).
    pub connected_load_w: f64,
}

impl ApplianceInventory {
    pub fn total_daily_energy_kwh(&self) -> f64 {
        self.total_daily_energy_wh / 1000.0
    }

    /// The `n` appliances with the highest daily energy, largest first.
    ///
    /// Ties keep catalog order.
    pub fn top_consumers(&self, n: usize) -> Vec<&ApplianceEnergy> {
        let mut ranked: Vec<&ApplianceEnergy> = self.appliances.iter().collect();
        ranked.sort_by(|a, b| b.daily_energy_wh.total_cmp(&a.daily_energy_wh));
        ranked.truncate(n);
        ranked
    }
}

/// Annotates every record with its derived fields and sums the catalog.
///
/// An empty catalog is valid and yields zero totals.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRecord`] for the first record with a zero
/// quantity, a negative power, or daily hours outside `[0, 24]`.
pub fn compute_daily_energy(records: &[ApplianceRecord]) -> Result<ApplianceInventory> {
    let mut appliances = Vec::with_capacity(records.len());
    let mut total_daily_energy_wh = 0.0;
    let mut connected_load_w = 0.0;

    for record in records {
        record.validate()?;
        let total_power_w = record.total_power_w();
        let daily_energy_wh = record.daily_energy_wh();
        total_daily_energy_wh += daily_energy_wh;
        connected_load_w += total_power_w;
        appliances.push(ApplianceEnergy {
            record: record.clone(),
            total_power_w,
            daily_energy_wh,
        });
    }

    Ok(ApplianceInventory {
        appliances,
        total_daily_energy_wh,
        connected_load_w,
    })
}
