//! HTTP handlers for the report export endpoint.
//!
//! This is where every pipeline failure is mapped to a caller-visible
//! status: the exact codes are a policy of this layer, not of the
//! pipeline, and they all pass through the single `ReportApiError` mapper.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::application::handlers::{ExportError, ExportReportHandler, ExportReportQuery};
use crate::domain::export::{Delimiter, DEFAULT_DELIMITER};
use crate::ports::{AdminAuthority, ReportReader};

use super::super::middleware::RequireCaller;
use super::dto::ErrorResponse;

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Report API error that implements IntoResponse.
#[derive(Debug)]
pub enum ReportApiError {
    BadRequest(String),
    Unauthenticated,
    Forbidden,
    AuthorityUnavailable(String),
    Internal(String),
}

impl IntoResponse for ReportApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ReportApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            ReportApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::unauthenticated("Authentication is required"),
            ),
            ReportApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                ErrorResponse::forbidden("Administrative privilege is required"),
            ),
            ReportApiError::AuthorityUnavailable(msg) => {
                tracing::error!("authority unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::authority_unavailable(
                        "Privilege could not be verified",
                    ),
                )
            }
            ReportApiError::Internal(msg) => {
                tracing::error!("report export failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("Report could not be built"),
                )
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<ExportError> for ReportApiError {
    fn from(error: ExportError) -> Self {
        match error {
            ExportError::IdentityMissing => ReportApiError::Unauthenticated,
            ExportError::Forbidden => ReportApiError::Forbidden,
            ExportError::AuthorityUnavailable(msg) => ReportApiError::AuthorityUnavailable(msg),
            ExportError::ReportQueryFailed(msg) => ReportApiError::Internal(msg),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing the export dependencies.
#[derive(Clone)]
pub struct ReportAppState {
    pub authority: Arc<dyn AdminAuthority>,
    pub reader: Arc<dyn ReportReader>,
}

impl ReportAppState {
    pub fn export_handler(&self) -> ExportReportHandler {
        ExportReportHandler::new(self.authority.clone(), self.reader.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Parameters
// ════════════════════════════════════════════════════════════════════════════════

/// Query parameters for the export endpoint.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Optional field delimiter; defaults to `;`.
    pub delimiter: Option<String>,
}

fn parse_delimiter(params: &ExportParams) -> Result<Delimiter, ReportApiError> {
    match params.delimiter.as_deref() {
        None => Ok(DEFAULT_DELIMITER),
        Some(raw) => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Delimiter::new(c).map_err(|e| {
                    ReportApiError::BadRequest(format!("Invalid delimiter: {}", e))
                }),
                _ => Err(ReportApiError::BadRequest(
                    "Delimiter must be a single character".to_string(),
                )),
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/report?delimiter=<char>
///
/// Exports the per-member aggregate report as delimited text.
pub async fn export_report(
    State(state): State<ReportAppState>,
    Query(params): Query<ExportParams>,
    RequireCaller(caller): RequireCaller,
) -> Result<Response, ReportApiError> {
    let delimiter = parse_delimiter(&params)?;

    let query = ExportReportQuery { caller, delimiter };
    let document = state.export_handler().handle(query).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        document,
    )
        .into_response())
}
