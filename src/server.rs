//! HTTP transport for the GraphQL schema.
//!
//! - `POST /` executes GraphQL requests
//! - `GET /` serves GraphiQL
//! - `GET /health` answers `ok`
//!
//! The `Authorization` header of each request is resolved to a
//! [`CurrentUser`](crate::auth::CurrentUser) before execution.

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse},
    routing::get,
};
use tokio::net::TcpListener;

use crate::auth;
use crate::error::Result;
use crate::graphql::{AppState, CatalogSchema, build_schema};

#[derive(Clone)]
struct ServerState {
    schema: CatalogSchema,
    app: Arc<AppState>,
}

async fn graphql_handler(
    State(state): State<ServerState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(user) = auth::identify(&state.app.store, &state.app.tokens, &headers) {
        request = request.data(user);
    }
    state.schema.execute(request).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/").finish())
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(app: Arc<AppState>) -> Router {
    let schema = build_schema(Arc::clone(&app));
    Router::new()
        .route("/", get(graphiql).post(graphql_handler))
        .route("/health", get(health))
        .with_state(ServerState { schema, app })
}

/// Binds the listener. `host` may be an IP address or a name such as `localhost`.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    Ok(TcpListener::bind((host, port)).await?)
}

pub async fn serve(listener: TcpListener, app: Arc<AppState>) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, uri = %app.store.uri(), "GraphQL server listening");
    axum::serve(listener, router(app)).await?;
    Ok(())
}

pub async fn run_server(app: Arc<AppState>, host: &str, port: u16) -> Result<()> {
    let listener = bind(host, port).await?;
    serve(listener, app).await
}
