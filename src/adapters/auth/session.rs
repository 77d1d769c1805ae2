//! Signed-session-token adapter for identity resolution.
//!
//! This adapter implements the `IdentityResolver` port for sessions carried
//! as HS256-signed tokens. The login relay (out of scope here) issues the
//! token at sign-in with the member's remote id as its subject; this side
//! only verifies the signature and expiry and maps the subject to a
//! [`CallerIdentity`].
//!
//! Every failure mode collapses to `IdentityError::NoSession`: from the
//! pipeline's perspective a bad token and a missing one are the same
//! unauthenticated caller.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::{CallerIdentity, IdentityError, RemoteId};
use crate::ports::IdentityResolver;

/// Claims carried by a session token.
#[derive(Debug, Deserialize)]
struct SessionClaims {
    /// Subject - the member's remote id.
    sub: String,
}

/// Session token validator backed by a shared signing secret.
pub struct SessionIdentityResolver {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionIdentityResolver {
    /// Creates a resolver for tokens signed with the given secret.
    pub fn new(secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl IdentityResolver for SessionIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<CallerIdentity, IdentityError> {
        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!("session token rejected: {}", e);
                IdentityError::NoSession
            })?;

        let remote_id = RemoteId::new(&token_data.claims.sub).map_err(|_| {
            tracing::warn!("session token carried an empty subject");
            IdentityError::NoSession
        })?;

        Ok(CallerIdentity::new(remote_id))
    }
}

impl std::fmt::Debug for SessionIdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIdentityResolver").finish_non_exhaustive()
    }
}
