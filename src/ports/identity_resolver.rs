//! Identity resolution port.
//!
//! Turns a request-supplied session token into the caller's identity.
//! Provider-agnostic: the production adapter validates a signed session
//! token, and a mock backs tests. The HTTP middleware is the only consumer;
//! handlers receive the already-resolved [`CallerIdentity`].

use async_trait::async_trait;

use crate::domain::foundation::{CallerIdentity, IdentityError};

/// Resolves the caller identity from a session token.
///
/// # Contract
///
/// Implementations must:
/// - Return the caller when the token maps to a registered member
/// - Return `IdentityError::NoSession` for missing, malformed, expired, or
///   unknown tokens
/// - Perform no side effects beyond whatever lookup the resolution needs
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve a raw session token (without any `Bearer ` prefix).
    async fn resolve(&self, token: &str) -> Result<CallerIdentity, IdentityError>;
}
