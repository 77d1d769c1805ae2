//! Read-only port for the aggregate report query.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::report::UserAggregateRow;

/// Computes the per-member aggregate report.
///
/// # Contract
///
/// Implementations must:
/// - Return exactly one row per registered member at the instant the query
///   executes - no filtering, no pagination, ordering unspecified
/// - Leave `gotten_answers_per_ad` absent (never zero, NaN, or an error)
///   for members owning no advertisements
/// - Return an error rather than partial results on any failure
/// - Be read-only; a point-in-time snapshot at the store's default
///   isolation is sufficient
#[async_trait]
pub trait ReportReader: Send + Sync {
    /// Runs the aggregation over the full member population.
    async fn user_aggregates(&self) -> Result<Vec<UserAggregateRow>, ReportError>;
}

/// Errors that can occur while building the report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report query failed: {0}")]
    Query(String),

    #[error("Report query timed out")]
    Timeout,
}

impl From<sqlx::Error> for ReportError {
    fn from(err: sqlx::Error) -> Self {
        ReportError::Query(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyRegisterReader;

    #[async_trait]
    impl ReportReader for EmptyRegisterReader {
        async fn user_aggregates(&self) -> Result<Vec<UserAggregateRow>, ReportError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn zero_members_is_a_valid_result() {
        let reader = EmptyRegisterReader;
        let rows = reader.user_aggregates().await.unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn error_conversion_from_sqlx() {
        let report_error: ReportError = sqlx::Error::RowNotFound.into();
        assert!(matches!(report_error, ReportError::Query(_)));
    }

    #[test]
    fn error_messages() {
        let err = ReportError::Query("broken pipe".to_string());
        assert_eq!(format!("{}", err), "Report query failed: broken pipe");

        let err = ReportError::Timeout;
        assert_eq!(format!("{}", err), "Report query timed out");
    }

    #[test]
    fn reader_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn ReportReader) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn ReportReader>>();
    }
}
