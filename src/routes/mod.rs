use std::sync::Arc;

use axum::{Router, middleware::from_fn};
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{catch_panic_layer, json_error_middleware},
    resource::ResourceDescriptor,
    services::todo_service::TODO_RESOURCE,
    state::AppState,
};

pub mod crud_router;
pub mod index;
pub mod representation;
pub mod todos;

/// Resources listed by the root index and `/profile`.
pub static RESOURCES: &[&ResourceDescriptor] = &[&TODO_RESOURCE];

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(index::router(&state.config.rest.base_path, RESOURCES))
        .merge(todos::router(state))
}

/// The served application: every route plus the error, panic and tracing
/// layers.
pub fn app(state: Arc<AppState>) -> Router {
    router(state)
        .layer(from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
}
