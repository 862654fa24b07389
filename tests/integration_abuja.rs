//! End-to-end check of the Abuja activity-table day.

mod common;

use backup_power_sim::sim::allocator::SupplySource;

use common::{abuja_activity_scenario, assert_close, run};

#[test]
fn profile_totals_and_peak() {
    let report = run(&abuja_activity_scenario());

    assert_close(report.economics.daily_energy_kwh, 36.94, "daily energy");
    assert_eq!(report.economics.peak_load_kw, 4.3);
    assert_eq!(report.economics.peak_hour, 6);
    assert_eq!(report.insights.peak_hour, 6);
}

#[test]
fn supply_split_by_source() {
    let report = run(&abuja_activity_scenario());
    let cost = &report.supply_cost;

    assert_close(cost.grid_kwh, 18.54, "grid energy");
    assert_close(cost.generator_kwh, 17.2, "generator energy");
    assert_close(cost.unserved_kwh, 1.2, "unserved energy");
    assert_eq!(cost.generator_run_hours, 6);
}

#[test]
fn small_night_loads_go_unserved() {
    let report = run(&abuja_activity_scenario());

    let unserved: Vec<usize> = report
        .allocation
        .iter()
        .filter(|a| a.source == SupplySource::Unserved)
        .map(|a| a.hour)
        .collect();
    assert_eq!(unserved, vec![0, 1, 3, 4, 5]);

    let generator: Vec<usize> = report
        .allocation
        .iter()
        .filter(|a| a.source == SupplySource::Generator)
        .map(|a| a.hour)
        .collect();
    assert_eq!(generator, vec![12, 13, 19, 20, 21, 22]);
}

#[test]
fn daily_tariff_cost() {
    let report = run(&abuja_activity_scenario());
    let cost = &report.supply_cost;

    assert_close(cost.grid_cost, 1854.0, "grid cost");
    assert_close(cost.generator_cost, 2580.0, "generator cost");
    assert_close(cost.daily_cost, 4434.0, "daily cost");
    assert_close(cost.monthly_cost, 4434.0 * 30.0, "monthly cost");
}

#[test]
fn fuel_only_burns_in_generator_hours() {
    let report = run(&abuja_activity_scenario());

    for (alloc, fuel) in report.allocation.iter().zip(&report.fuel) {
        if alloc.source == SupplySource::Generator {
            assert!(fuel.liters_per_hour > 0.0, "hour {} burnt nothing", alloc.hour);
        } else {
            assert_eq!(fuel.liters_per_hour, 0.0, "hour {} burnt fuel", alloc.hour);
        }
    }

    // 4.0 kW on 11 kW sits between the 25 % and 50 % breakpoints.
    let expected_20 = 2.0 + 1.5 * (4.0 / 11.0 * 100.0 - 25.0) / 25.0;
    assert_close(report.fuel[20].liters_per_hour, expected_20, "hour 20 rate");
    assert_close(
        report.fuel[23].cumulative_liters,
        report.economics.daily.fuel_liters,
        "cumulative liters",
    );
}

#[test]
fn economics_projections() {
    let report = run(&abuja_activity_scenario());
    let e = &report.economics;

    assert_close(e.daily.total_cost, e.daily.fuel_cost * 1.2, "maintenance");
    assert_close(e.annual_capital_cost, 850_000.0 * 0.7 / 3.0, "capital");
    assert_close(e.annual.total_cost, e.daily.total_cost * 365.0, "annual");
    assert_close(e.average_load_kw, 36.94 / 24.0, "average load");
    assert_close(e.capacity_factor_pct, 36.94 / 24.0 / 11.0 * 100.0, "capacity factor");
    assert_close(e.load_factor.unwrap(), 36.94 / 24.0 / 4.3, "load factor");

    let efficiency = e.overall_efficiency_pct.unwrap();
    assert_close(
        efficiency,
        17.2 / (e.daily.fuel_liters * 9.7) * 100.0,
        "overall efficiency",
    );
}
