//! Supply-side analysis: grid availability, source allocation, fuel burn and
//! the economics rolled up from them.

pub mod allocator;
pub mod economics;
/// Pipeline wiring from scenario configuration to a finished report.
pub mod engine;
/// Generator efficiency curve and hourly fuel use.
pub mod fuel;
pub mod grid;
pub mod insights;
pub mod report;
/// Fuel price sweep over a day's fuel volume.
pub mod sensitivity;
pub mod tariff;
