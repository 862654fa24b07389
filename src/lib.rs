//! Household load-profile and backup-generator economics engine.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod error;
/// Appliance catalog and hourly load curve construction.
pub mod household;
pub mod io;
/// Grid/generator allocation, fuel model, economics and reporting.
pub mod sim;
