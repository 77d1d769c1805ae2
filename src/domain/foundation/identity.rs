//! Caller identity types.
//!
//! A `CallerIdentity` represents the requester after session resolution.
//! It has **no provider dependencies** - any session mechanism (signed
//! token, server-side session store) can populate it via the
//! `IdentityResolver` port. It exists only for the duration of one request.

use super::RemoteId;
use thiserror::Error;

/// The resolved identity of the member making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// The member's external unique identifier.
    pub remote_id: RemoteId,
}

impl CallerIdentity {
    /// Creates a caller identity for a resolved member.
    pub fn new(remote_id: RemoteId) -> Self {
        Self { remote_id }
    }
}

/// Errors that can occur while resolving the caller from a request context.
///
/// These are **domain-centric** - they describe what went wrong from the
/// application's perspective, not the session mechanism's.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// No resolvable session: token missing, malformed, expired, or not
    /// associated with any member.
    #[error("No session")]
    NoSession,
}
