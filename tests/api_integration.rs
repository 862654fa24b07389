//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;

use backup_power_sim::api::{AppState, router};

use common::{abuja_activity_scenario, run};

async fn get(uri: &str) -> (StatusCode, Value) {
    let state = Arc::new(AppState {
        report: run(&abuja_activity_scenario()),
    });
    let resp = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn summary_matches_engine_numbers() {
    let (status, json) = get("/summary").await;
    assert_eq!(status, StatusCode::OK);

    let daily_cost = json["supply_cost"]["daily_cost"].as_f64().unwrap();
    assert!((daily_cost - 4434.0).abs() < 1e-6);
    assert_eq!(json["economics"]["peak_hour"], 6);
    assert_eq!(json["sensitivity"].as_array().map(Vec::len), Some(15));
}

#[tokio::test]
async fn hourly_rows_carry_csv_columns() {
    let (status, json) = get("/hourly?from=0&to=5").await;
    assert_eq!(status, StatusCode::OK);

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    for key in [
        "hour",
        "hour_label",
        "load_kw",
        "grid_available",
        "grid_kwh",
        "generator_kwh",
        "unserved_kwh",
        "fuel_l_per_hour",
        "cumulative_cost",
        "cost_per_kwh",
        "generator_efficiency_pct",
    ] {
        assert!(rows[0].get(key).is_some(), "missing {key}");
    }
    assert_eq!(rows[0]["source"], "unserved");
    assert_eq!(rows[2]["source"], "grid");
    assert!(rows[0]["generator_efficiency_pct"].is_null());
}

#[tokio::test]
async fn hourly_open_ended_range() {
    let (_, json) = get("/hourly?from=20").await;
    assert_eq!(json.as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn hourly_reversed_range_is_rejected() {
    let (status, json) = get("/hourly?from=23&to=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("from"));
}

#[tokio::test]
async fn appliances_lists_catalog() {
    let (status, json) = get("/appliances").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(16));
}
