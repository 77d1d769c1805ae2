//! Identity and authorization adapters.

mod authority;
mod mock;
mod session;

pub use authority::{AuthorityConfig, HttpAdminAuthority};
pub use mock::{MockAdminAuthority, MockIdentityResolver};
pub use session::SessionIdentityResolver;
