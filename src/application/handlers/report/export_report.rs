//! ExportReportHandler - the admin report export pipeline.
//!
//! Runs the stages of one export request in strict order: authorize the
//! caller against the external authority, build the aggregate report,
//! encode it as a delimited document. A failure in any stage aborts every
//! stage after it; in particular, no report query is ever issued for a
//! caller whose privilege was denied or could not be proven.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::export::{self, Delimiter};
use crate::domain::foundation::CallerIdentity;
use crate::ports::{AdminAuthority, AuthorityError, ReportError, ReportReader};

/// Request to export the aggregate report.
#[derive(Debug, Clone)]
pub struct ExportReportQuery {
    /// The resolved caller requesting the export.
    pub caller: CallerIdentity,
    /// Field delimiter for the document.
    pub delimiter: Delimiter,
}

/// Terminal failure of the export pipeline.
///
/// Exactly one of these reaches the error mapper per failed request; no
/// stage downgrades or swallows an earlier stage's failure.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// No resolvable caller. Produced at the request boundary, before the
    /// pipeline proper starts.
    #[error("No resolvable caller identity")]
    IdentityMissing,

    /// The caller is known but holds no administrative privilege.
    #[error("Caller lacks administrative privilege")]
    Forbidden,

    /// The authority call failed, so privilege could not be proven. Access
    /// is not granted by default.
    #[error("Authorization authority unavailable: {0}")]
    AuthorityUnavailable(String),

    /// The aggregation query failed; no partial report exists.
    #[error("Report query failed: {0}")]
    ReportQueryFailed(String),
}

impl From<AuthorityError> for ExportError {
    fn from(err: AuthorityError) -> Self {
        match err {
            AuthorityError::Unavailable(reason) => ExportError::AuthorityUnavailable(reason),
        }
    }
}

impl From<ReportError> for ExportError {
    fn from(err: ReportError) -> Self {
        ExportError::ReportQueryFailed(err.to_string())
    }
}

/// Handler for the export pipeline.
pub struct ExportReportHandler {
    authority: Arc<dyn AdminAuthority>,
    reader: Arc<dyn ReportReader>,
}

impl ExportReportHandler {
    pub fn new(authority: Arc<dyn AdminAuthority>, reader: Arc<dyn ReportReader>) -> Self {
        Self { authority, reader }
    }

    /// Runs the pipeline for one request and returns the encoded document.
    ///
    /// Zero registered members is a valid outcome and yields a header-only
    /// document.
    pub async fn handle(&self, query: ExportReportQuery) -> Result<String, ExportError> {
        let is_admin = self.authority.is_admin(&query.caller.remote_id).await?;
        if !is_admin {
            tracing::warn!(
                caller = %query.caller.remote_id,
                "non-admin attempted report export"
            );
            return Err(ExportError::Forbidden);
        }

        let rows = self.reader.user_aggregates().await?;
        tracing::debug!(rows = rows.len(), "aggregate report built");

        Ok(export::encode(&rows, query.delimiter))
    }
}
