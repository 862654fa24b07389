//! Invariants that hold for every scenario.

mod common;

use backup_power_sim::config::ScenarioConfig;
use backup_power_sim::io::export::{write_hourly_csv, write_summary_csv};
use backup_power_sim::sim::fuel::{Breakpoint, EfficiencyCurve, GeneratorSpec, fuel_rate};

use common::{TOL, all_zero_scenario, presets, run};

fn reference_generator() -> GeneratorSpec {
    let curve = EfficiencyCurve::new(vec![
        Breakpoint::new(0.0, 0.0),
        Breakpoint::new(25.0, 2.0),
        Breakpoint::new(50.0, 3.5),
        Breakpoint::new(75.0, 5.0),
        Breakpoint::new(100.0, 6.5),
    ])
    .unwrap();
    GeneratorSpec::new(11.0, 900.0, 850_000.0, curve).unwrap()
}

#[test]
fn energy_is_conserved_every_hour() {
    for cfg in presets() {
        let report = run(&cfg);
        for (point, alloc) in report.profile.points().iter().zip(&report.allocation) {
            assert!(
                (alloc.total_kwh() - point.load_kw).abs() < TOL,
                "{}: hour {} leaks energy",
                cfg.name,
                point.hour
            );
        }
    }
}

#[test]
fn at_most_one_source_per_hour() {
    for cfg in presets() {
        for a in &run(&cfg).allocation {
            let non_zero = [a.grid_kwh, a.generator_kwh, a.unserved_kwh]
                .iter()
                .filter(|&&kwh| kwh != 0.0)
                .count();
            assert!(non_zero <= 1, "{}: hour {} split {non_zero} ways", cfg.name, a.hour);
        }
    }
}

#[test]
fn fuel_rate_is_monotone_in_load() {
    let spec = reference_generator();
    let mut previous = fuel_rate(0.0, &spec);
    for step in 1..=1300 {
        let rate = fuel_rate(f64::from(step) * 0.01, &spec);
        assert!(rate >= previous, "rate fell at {} kW", f64::from(step) * 0.01);
        previous = rate;
    }
}

#[test]
fn breakpoints_are_reproduced_exactly() {
    let spec = reference_generator();
    assert_eq!(fuel_rate(5.5, &spec), 3.5);
    assert_eq!(fuel_rate(8.25, &spec), 5.0);
    assert_eq!(fuel_rate(0.0, &spec), 0.0);
    assert_eq!(fuel_rate(11.0, &spec), 6.5);
}

#[test]
fn load_factor_within_unit_interval() {
    for cfg in presets() {
        let e = run(&cfg).economics;
        let lf = e.load_factor.expect("presets have demand");
        assert!((0.0..=1.0).contains(&lf), "{}: load factor {lf}", cfg.name);
    }
}

#[test]
fn identical_config_gives_identical_csv_bytes() {
    for cfg in presets() {
        let (a, b) = (run(&cfg), run(&cfg));
        assert_eq!(a.economics, b.economics);

        let (mut hourly_a, mut hourly_b) = (Vec::new(), Vec::new());
        write_hourly_csv(&a.hourly_records(), &mut hourly_a).unwrap();
        write_hourly_csv(&b.hourly_records(), &mut hourly_b).unwrap();
        assert_eq!(hourly_a, hourly_b);

        let (mut summary_a, mut summary_b) = (Vec::new(), Vec::new());
        write_summary_csv(&a, &mut summary_a).unwrap();
        write_summary_csv(&b, &mut summary_b).unwrap();
        assert_eq!(summary_a, summary_b);
    }
}

#[test]
fn all_zero_day_is_degenerate_not_fatal() {
    let report = run(&all_zero_scenario());
    let e = &report.economics;

    assert_eq!(e.load_factor, None);
    assert_eq!(e.daily.fuel_liters, 0.0);
    assert_eq!(e.cost_per_kwh.fuel_only, None);
    assert_eq!(e.overall_efficiency_pct, None);
    assert_eq!(report.supply_cost.grid_share, None);
    assert!(report.to_string().contains("n/a"));
}

#[test]
fn continuous_preset_never_uses_grid() {
    let report = run(&ScenarioConfig::continuous());
    assert_eq!(report.supply_cost.grid_kwh, 0.0);
    assert_eq!(report.supply_cost.generator_run_hours, 24);
    assert!((report.economics.daily_energy_kwh - 32.85).abs() < TOL);
    assert_eq!(report.economics.peak_hour, 7);
}

#[test]
fn sweep_cost_rises_with_price() {
    let report = run(&ScenarioConfig::lagos());
    assert!(
        report
            .sensitivity
            .windows(2)
            .all(|w| w[1].daily_total_cost >= w[0].daily_total_cost)
    );
    let last = report.sensitivity.last().unwrap();
    assert_eq!(last.fuel_price_per_liter, 1200.0);
}
