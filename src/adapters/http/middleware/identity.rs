//! Identity middleware and extractor for axum.
//!
//! This module provides:
//! - `identity_middleware` - Layer that resolves Bearer tokens and injects
//!   the caller into extensions
//! - `RequireCaller` - Extractor that requires a resolved caller
//!
//! # Architecture
//!
//! The middleware uses the `IdentityResolver` port, keeping it
//! mechanism-agnostic. Whether sessions are signed tokens or a mock for
//! testing, the middleware doesn't change.
//!
//! ```text
//! Request → identity_middleware → injects CallerIdentity into extensions
//!                                         ↓
//!                                 Handler → RequireCaller reads extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::CallerIdentity;
use crate::ports::IdentityResolver;

/// Identity middleware state - wraps the resolver port.
pub type IdentityState = Arc<dyn IdentityResolver>;

/// Middleware that resolves Bearer tokens into a caller identity.
///
/// On a resolvable token the `CallerIdentity` lands in request extensions;
/// on a missing or unresolvable token the request continues without one,
/// and `RequireCaller` rejects it in handlers that need a caller. The
/// distinction between "no token" and "bad token" is deliberately not
/// surfaced - both are the same unauthenticated caller.
pub async fn identity_middleware(
    State(resolver): State<IdentityState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if let Some(token) = token {
        if let Ok(caller) = resolver.resolve(token).await {
            request.extensions_mut().insert(caller);
        }
    }

    next.run(request).await
}

/// Extractor that requires a resolved caller identity.
///
/// Returns 401 when the identity middleware did not resolve a caller for
/// this request.
#[derive(Debug, Clone)]
pub struct RequireCaller(pub CallerIdentity);

impl<S> axum::extract::FromRequestParts<S> for RequireCaller
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<CallerIdentity>()
                .cloned()
                .map(RequireCaller)
                .ok_or(IdentityRejection::Unauthenticated)
        })
    }
}

/// Rejection type for identity failures.
#[derive(Debug, Clone)]
pub enum IdentityRejection {
    /// No resolvable caller identity on the request.
    Unauthenticated,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            IdentityRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": "UNAUTHENTICATED"
            })),
        )
            .into_response()
    }
}
