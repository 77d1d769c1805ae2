//! HTTP middleware.

mod identity;

pub use identity::{identity_middleware, IdentityRejection, IdentityState, RequireCaller};
