//! HTTP API server

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Prefix the cab routes are mounted under unless configured otherwise
pub const DEFAULT_PATH_PREFIX: &str = "/v1";

/// Build the API router using the provided application state.
///
/// Cab routes live under `path_prefix`; an empty prefix (or `/`) mounts them
/// at the root. The health endpoint is always at `/health`.
pub fn create_router(state: AppState, path_prefix: &str) -> Router {
    let cabs = Router::new()
        .route(
            "/cabs",
            get(handlers::list_cabs).post(handlers::create_cab),
        )
        .route(
            "/cabs/:id",
            get(handlers::get_cab)
                .put(handlers::update_cab)
                .delete(handlers::delete_cab),
        );

    let prefix = path_prefix.trim_end_matches('/');
    let router = Router::new().route("/health", get(handlers::health));
    let router = if prefix.is_empty() {
        router.merge(cabs)
    } else if prefix.starts_with('/') {
        router.nest(prefix, cabs)
    } else {
        router.nest(&format!("/{}", prefix), cabs)
    };

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Convenience helper mounting the cab routes under [`DEFAULT_PATH_PREFIX`]
pub fn create_default_router(state: AppState) -> Router {
    create_router(state, DEFAULT_PATH_PREFIX)
}
