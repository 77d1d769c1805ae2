//! Mock adapters for the identity and authority ports.
//!
//! These implement `IdentityResolver` and `AdminAuthority` for tests,
//! avoiding a real session secret or a live authority service.
//!
//! # Example
//!
//! ```ignore
//! use member_register::adapters::auth::{MockAdminAuthority, MockIdentityResolver};
//!
//! let resolver = MockIdentityResolver::new().with_member("valid-token", "member-1");
//! let authority = MockAdminAuthority::new().with_decision("member-1", true);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{CallerIdentity, IdentityError, RemoteId};
use crate::ports::{AdminAuthority, AuthorityError, IdentityResolver};

/// Mock identity resolver for testing.
///
/// Stores a map of tokens to callers. Tokens not in the map resolve to
/// `NoSession`.
#[derive(Debug, Default)]
pub struct MockIdentityResolver {
    /// Map of valid tokens to the callers they resolve to
    sessions: RwLock<HashMap<String, CallerIdentity>>,
}

impl MockIdentityResolver {
    /// Creates a new empty mock resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that resolves to the given caller.
    pub fn with_caller(self, token: impl Into<String>, caller: CallerIdentity) -> Self {
        self.sessions.write().unwrap().insert(token.into(), caller);
        self
    }

    /// Adds a valid token for a member with the given remote id.
    pub fn with_member(self, token: impl Into<String>, remote_id: impl Into<String>) -> Self {
        let caller = CallerIdentity::new(RemoteId::new(remote_id).unwrap());
        self.with_caller(token, caller)
    }

    /// Registers a new valid token at runtime.
    pub fn add_session(&self, token: impl Into<String>, caller: CallerIdentity) {
        self.sessions.write().unwrap().insert(token.into(), caller);
    }

    /// Removes a token, making it invalid.
    pub fn remove_session(&self, token: &str) {
        self.sessions.write().unwrap().remove(token);
    }

    /// Returns the number of registered valid tokens.
    pub fn session_count(&self) -> usize {
        self.sessions.read().unwrap().len()
    }
}

#[async_trait]
impl IdentityResolver for MockIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<CallerIdentity, IdentityError> {
        self.sessions
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(IdentityError::NoSession)
    }
}

/// Mock admin authority for testing.
///
/// Stores per-member decisions. Unknown members are non-admins; an optional
/// forced error simulates an unreachable authority. Every check is counted
/// so tests can assert how often the authority was consulted.
#[derive(Debug, Default)]
pub struct MockAdminAuthority {
    /// Map of remote ids to their privilege decision
    decisions: RwLock<HashMap<String, bool>>,
    /// Optional error to return for all checks (for error testing)
    force_error: RwLock<Option<AuthorityError>>,
    /// Number of checks performed
    calls: AtomicUsize,
}

impl MockAdminAuthority {
    /// Creates a new empty mock authority.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a privilege decision for a member.
    pub fn with_decision(self, remote_id: impl Into<String>, is_admin: bool) -> Self {
        self.decisions
            .write()
            .unwrap()
            .insert(remote_id.into(), is_admin);
        self
    }

    /// Forces all checks to return the specified error.
    pub fn with_error(self, error: AuthorityError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Records a privilege decision at runtime.
    pub fn set_decision(&self, remote_id: impl Into<String>, is_admin: bool) {
        self.decisions
            .write()
            .unwrap()
            .insert(remote_id.into(), is_admin);
    }

    /// Returns how many privilege checks have been performed.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdminAuthority for MockAdminAuthority {
    async fn is_admin(&self, remote_id: &RemoteId) -> Result<bool, AuthorityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        Ok(self
            .decisions
            .read()
            .unwrap()
            .get(remote_id.as_str())
            .copied()
            .unwrap_or(false))
    }
}
