//! Identity context building for the GraphQL API.
//! Keep the public surface thin and split implementation across sub-modules.

mod context;
mod credential;
mod principal;
mod token;

pub use context::RequestContext;
pub use credential::{hash_password, verify_password};
pub use principal::Identity;
pub use token::{sign_token, verify_token, TOKEN_TTL_SECS};
