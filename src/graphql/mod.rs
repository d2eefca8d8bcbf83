//! GraphQL API for the registry
//!
//! Wires the resolver roots into an executable schema:
//! - [`QueryRoot`]: ungated reads (shaped student/course lookups)
//! - [`MutationRoot`]: token-gated writes plus signup/login
//!
//! The schema carries the shared store handle and the signing secret as
//! schema data; the per-request [`crate::identity::RequestContext`] is
//! attached by the HTTP layer before execution.

mod mutation;
mod query;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::*;

use async_graphql::{EmptySubscription, Schema};

use crate::error::AppError;
use crate::store::SharedStore;

pub type RegistrySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Token-signing secret carried as schema data.
pub struct AuthSecret(pub String);

/// Build the executable schema over an injected store handle.
pub fn build_schema(store: SharedStore, secret: String) -> RegistrySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .data(AuthSecret(secret))
        .finish()
}

/// Map a core error into a GraphQL error with `code`/`status` extensions.
pub(crate) fn to_gql(err: impl Into<AppError>) -> async_graphql::Error {
    err.into().into_graphql()
}
