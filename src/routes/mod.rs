//! Router assembly. Data routes are not declared per model: the fallback handler
//! matches paths against the [`RouteTable`] built from the registry.

pub mod common;
pub mod pattern;

pub use common::common_routes;
pub use pattern::*;

use crate::handlers::dispatch;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Read-only API: requests carry no meaningful body.
const MAX_REQUEST_BODY: usize = 16 * 1024;

pub fn api_routes(state: AppState) -> Router {
    common_routes()
        .fallback(dispatch)
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
