//! HTTP API
//!
//! One POST endpoint; the operation travels in the body. The service
//! is called from a browser, so every response carries a permissive
//! `Access-Control-Allow-Origin` and the `OPTIONS` preflight is
//! answered with 204 and the allowed method/header set.

mod handler;

use axum::Router;
use axum::routing::post;
use http::HeaderValue;
use http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build the router with middleware attached
pub fn build_app(state: ServerState) -> Router {
    Router::new()
        .route("/", post(handler::dispatch).options(handler::preflight))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
