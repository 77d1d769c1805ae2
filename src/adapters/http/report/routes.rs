//! HTTP routes for the report export endpoint.

use axum::routing::get;
use axum::Router;

use super::handlers::{export_report, ReportAppState};

/// Creates the report router with all routes.
pub fn report_routes(state: ReportAppState) -> Router {
    Router::new()
        // GET /api/admin/report
        .route("/api/admin/report", get(export_report))
        .with_state(state)
}
