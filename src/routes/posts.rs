//! Post routes. The header gate runs as a route layer, before any handler or body parsing.

use crate::extractors::require_email;
use crate::handlers::posts::{create, delete as delete_handler, list, read, search, update};
use crate::state::AppState;
use axum::{middleware, routing::get, Router};

pub fn post_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/search", get(search))
        .route("/:id", get(read).put(update).delete(delete_handler))
        .route_layer(middleware::from_fn(require_email))
        .with_state(state)
}
