//! Read-only REST API over a finished analysis run.
//!
//! Provides three GET endpoints:
//! - `/summary`: economics, supply cost, load insights and fuel price sweep
//! - `/hourly`: joined hourly rows with optional inclusive hour range
//! - `/appliances`: appliance catalog with derived energy

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::sim::report::AnalysisReport;

pub use types::{ErrorResponse, HourlyQuery, SummaryResponse};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the run completes and wrapped in `Arc`; no locks
/// are needed since all data is read-only.
pub struct AppState {
    pub report: AnalysisReport,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/hourly", get(handlers::get_hourly))
        .route("/appliances", get(handlers::get_appliances))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
