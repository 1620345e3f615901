//! Router assembly.

mod common;
mod docs;
mod posts;
mod users;

pub use common::{common_routes, common_routes_with_ready};
pub use docs::{docs_routes, ApiDoc};
pub use posts::post_routes;
pub use users::user_routes;

use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// All API routes: `/users`, `/posts`, operational routes, and the OpenAPI document.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(docs_routes())
        .nest("/users", user_routes(state.clone()))
        .nest("/posts", post_routes(state))
}

/// [`router`] plus the request body cap and HTTP tracing.
pub fn app(state: AppState, config: &Config) -> Router {
    router(state)
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
