//! Route gateway: merges every endpoint's subrouter and attaches state.

use axum::Router;

use crate::UpstreamClient;

mod health;
mod predict_flood;
mod simulate;

// ---

pub fn router(upstream: UpstreamClient) -> Router {
    // ---
    Router::new()
        .merge(predict_flood::router())
        .merge(simulate::router())
        .merge(health::router())
        .with_state(upstream)
}
