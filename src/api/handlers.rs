//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, HourlyQuery, SummaryResponse};
use crate::household::appliance::ApplianceEnergy;
use crate::sim::report::HourlyRecord;

/// `GET /summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse::from(&state.report))
}

/// Returns hourly rows, optionally filtered by hour range.
///
/// `GET /hourly` → 200 + all 24 rows
/// `GET /hourly?from=N&to=M` → filtered range (inclusive)
/// `GET /hourly?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_hourly(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HourlyQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let rows: Vec<HourlyRecord> = state
        .report
        .hourly_records()
        .into_iter()
        .filter(|r| r.hour >= from && r.hour <= to)
        .collect();

    Ok(Json(rows))
}

/// `GET /appliances` → 200 + appliance rows in catalog order
pub async fn get_appliances(State(state): State<Arc<AppState>>) -> Json<Vec<ApplianceEnergy>> {
    Json(state.report.inventory.appliances.clone())
}
