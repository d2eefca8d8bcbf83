pub mod error;
pub mod graphql;
pub mod identity;
pub mod model;
pub mod query;
pub mod relations;
pub mod server;
pub mod store;
