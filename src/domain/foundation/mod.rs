//! Foundation value objects shared across the domain.

mod errors;
mod identity;
mod ids;

pub use errors::ValidationError;
pub use identity::{CallerIdentity, IdentityError};
pub use ids::RemoteId;
