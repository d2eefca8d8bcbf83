//!
//! campusgraph HTTP server
//! -----------------------
//! This module defines the Axum-based HTTP surface: a single `/graphql`
//! endpoint (POST executes, GET serves GraphiQL) plus a JSON health probe.
//!
//! Responsibilities:
//! - Building the request context (bearer token verification) once per
//!   request before handing execution to the GraphQL engine.
//! - Startup wiring: store construction, schema build, route mounting.

use std::net::SocketAddr;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::graphql::{build_schema, RegistrySchema};
use crate::identity::RequestContext;
use crate::store::{MemoryStore, SharedStore};

/// Shared server state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub schema: RegistrySchema,
    pub secret: String,
}

async fn graphql_handler(State(state): State<AppState>, headers: HeaderMap, req: GraphQLRequest) -> GraphQLResponse {
    // Verification failure degrades to anonymous here; gating happens per
    // mutation inside the resolvers.
    let rc = RequestContext::from_headers(&headers, &state.secret);
    state.schema.execute(req.into_inner().data(rc)).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Build the router over an injected store handle. Split out from
/// [`run_with_port`] so tests can drive the full HTTP surface.
pub fn build_router(store: SharedStore, secret: String) -> Router {
    let schema = build_schema(store, secret.clone());
    let app_state = AppState { schema, secret };
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/healthz", get(healthz))
        .with_state(app_state)
}

/// Start the HTTP server bound to the given port with a fresh in-memory
/// store.
pub async fn run_with_port(http_port: u16, secret: String) -> anyhow::Result<()> {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let app = build_router(store, secret);

    let addr: SocketAddr = format!("0.0.0.0:{}", http_port).parse()?;
    info!("Starting server on {} (GraphiQL at /graphql)", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
