//! HTTP API for the registration service.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use registration_store::Store;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Registration store, opened once at startup
    pub store: Arc<Store>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Registration routes, relative to their mount point.
fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/registrations",
            post(handlers::create_registration)
                .get(handlers::list_registrations)
                .fallback(|method: Method| async move {
                    method_not_allowed(method, REGISTRATIONS_METHODS)
                }),
        )
        .route(
            "/registrations/phone/:phone",
            get(handlers::get_registration_by_phone).fallback(|method: Method| async move {
                method_not_allowed(method, PHONE_LOOKUP_METHODS)
            }),
        )
        .route(
            "/registrations/:id",
            put(handlers::update_registration).fallback(|method: Method| async move {
                method_not_allowed(method, REGISTRATION_METHODS)
            }),
        )
        .route(
            "/health",
            get(handlers::health).fallback(|method: Method| async move {
                method_not_allowed(method, HEALTH_METHODS)
            }),
        )
}

/// Create the API router.
///
/// Routes are served both at the root and under `/api`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .nest("/api", routes())
        .fallback(handlers::not_found)
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
