//! API response and query types.
//!
//! Field names match the CSV export columns.

use serde::{Deserialize, Serialize};

use crate::sim::economics::EconomicsSummary;
use crate::sim::insights::LoadInsights;
use crate::sim::report::AnalysisReport;
use crate::sim::sensitivity::SensitivityPoint;
use crate::sim::tariff::SupplyCost;

/// Aggregates of the run; sentinels serialize as `null`.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub scenario: String,
    pub economics: EconomicsSummary,
    pub supply_cost: SupplyCost,
    pub insights: LoadInsights,
    pub sensitivity: Vec<SensitivityPoint>,
}

impl From<&AnalysisReport> for SummaryResponse {
    fn from(r: &AnalysisReport) -> Self {
        Self {
            scenario: r.scenario.clone(),
            economics: r.economics.clone(),
            supply_cost: r.supply_cost.clone(),
            insights: r.insights.clone(),
            sensitivity: r.sensitivity.clone(),
        }
    }
}

/// Optional range query parameters for the hourly endpoint.
#[derive(Debug, Deserialize)]
pub struct HourlyQuery {
    /// First hour (inclusive).
    pub from: Option<usize>,
    /// Last hour (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
