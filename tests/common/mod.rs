//! Shared test fixtures for integration tests.

use backup_power_sim::config::ScenarioConfig;
use backup_power_sim::sim::engine::Engine;
use backup_power_sim::sim::report::AnalysisReport;

/// Tolerance for floating-point comparisons.
pub const TOL: f64 = 1e-9;

/// Abuja activity table without the AC layers: base 0.16 kW, grid down at
/// {0,1,3,4,5,12,13,19,20,21,22}, generator threshold 0.5 kW, tariffs
/// 100/150 NGN/kWh.
pub fn abuja_activity_scenario() -> ScenarioConfig {
    let mut cfg = ScenarioConfig::baseline();
    cfg.profile.layers.clear();
    cfg
}

/// Scenario with zero demand in every hour.
pub fn all_zero_scenario() -> ScenarioConfig {
    let mut cfg = ScenarioConfig::baseline();
    cfg.profile.base_kw = 0.0;
    cfg.profile.overrides.clear();
    cfg.profile.layers.clear();
    cfg
}

/// Builds and runs the engine, panicking on any error.
pub fn run(cfg: &ScenarioConfig) -> AnalysisReport {
    Engine::from_config(cfg)
        .and_then(|engine| engine.run())
        .unwrap_or_else(|e| panic!("scenario `{}` failed: {e}", cfg.name))
}

/// Every built-in preset, by name.
pub fn presets() -> Vec<ScenarioConfig> {
    ScenarioConfig::PRESETS
        .iter()
        .map(|name| ScenarioConfig::from_preset(name).expect("preset should load"))
        .collect()
}

pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "{what}: expected {expected}, got {actual}"
    );
}
