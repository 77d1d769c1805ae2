//! Administrative authority port.
//!
//! The external system of record for privilege decisions. The pipeline asks
//! it one question per export request: does this member hold administrative
//! privilege? The decision is recomputed on every request and never cached;
//! callers must not assume the authority's state holds between calls.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::RemoteId;

/// Asks the external authority whether a member is an administrator.
///
/// # Contract
///
/// Implementations must:
/// - Return `Ok(true)` / `Ok(false)` when the authority answers - a denial
///   is a valid decision, not an error
/// - Return `AuthorityError::Unavailable` when the authority cannot be
///   reached, times out, or answers unintelligibly; privilege must never
///   be assumed in either direction on failure
/// - Perform no retries; the single round trip is the whole operation
#[async_trait]
pub trait AdminAuthority: Send + Sync {
    /// Check administrative privilege for the member with this remote id.
    async fn is_admin(&self, remote_id: &RemoteId) -> Result<bool, AuthorityError>;
}

/// Errors from the authority boundary.
#[derive(Debug, Clone, Error)]
pub enum AuthorityError {
    /// The authority was unreachable, timed out, or returned an
    /// unintelligible response. The privilege question is unanswered.
    #[error("Authorization authority unavailable: {0}")]
    Unavailable(String),
}

impl AuthorityError {
    /// Creates an unavailable error with a reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}
