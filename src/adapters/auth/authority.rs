//! HTTP adapter for the external administrative authority.
//!
//! The authority is the register's system of record for privilege: given a
//! member's remote id it answers whether that member is an administrator.
//! This adapter performs the single round trip per check:
//!
//! 1. `GET {base_url}/members/{remote_id}/admin` with an API-key header
//! 2. Expect a JSON body `{"admin": <bool>}`
//!
//! Any transport failure, timeout, non-success status, or unparseable body
//! maps to `AuthorityError::Unavailable`. A `false` decision is returned as
//! a decision, never as an error. The call is not retried; an
//! audit-sensitive privilege check must not paper over an unreachable
//! authority with a default in either direction.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::RemoteId;
use crate::ports::{AdminAuthority, AuthorityError};

/// Configuration for the authority adapter.
#[derive(Debug, Clone)]
pub struct AuthorityConfig {
    /// Base URL of the authority service.
    pub base_url: String,

    /// API key sent with every decision request.
    pub api_key: SecretString,

    /// Upper bound on one decision round trip.
    /// Defaults to 10 seconds if not specified.
    pub timeout: Option<Duration>,
}

impl AuthorityConfig {
    /// Create a new configuration with required fields.
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            timeout: None,
        }
    }

    /// Set a custom round-trip timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the decision URL for a member.
    fn decision_url(&self, remote_id: &RemoteId) -> String {
        format!(
            "{}/members/{}/admin",
            self.base_url.trim_end_matches('/'),
            remote_id
        )
    }
}

/// Decision payload returned by the authority.
#[derive(Debug, Deserialize)]
struct PrivilegeDecision {
    admin: bool,
}

/// HTTP implementation of `AdminAuthority`.
pub struct HttpAdminAuthority {
    config: AuthorityConfig,
    http_client: reqwest::Client,
}

impl HttpAdminAuthority {
    /// Create a new authority client.
    pub fn new(config: AuthorityConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout.unwrap_or(Duration::from_secs(10)))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl AdminAuthority for HttpAdminAuthority {
    async fn is_admin(&self, remote_id: &RemoteId) -> Result<bool, AuthorityError> {
        let url = self.config.decision_url(remote_id);

        tracing::debug!(member = %remote_id, "requesting privilege decision");

        let response = self
            .http_client
            .get(&url)
            .header("x-api-key", self.config.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("authority request failed: {}", e);
                if e.is_timeout() {
                    AuthorityError::unavailable("decision request timed out")
                } else {
                    AuthorityError::unavailable(format!("decision request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("authority returned {}", status);
            return Err(AuthorityError::unavailable(format!(
                "authority returned {}",
                status
            )));
        }

        let decision: PrivilegeDecision = response.json().await.map_err(|e| {
            tracing::error!("failed to parse authority response: {}", e);
            AuthorityError::unavailable(format!("unparseable decision payload: {}", e))
        })?;

        Ok(decision.admin)
    }
}

impl std::fmt::Debug for HttpAdminAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAdminAuthority")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
