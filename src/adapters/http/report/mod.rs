//! Report export HTTP surface.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{ReportApiError, ReportAppState};
pub use routes::report_routes;
