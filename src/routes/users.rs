use crate::handlers::users::{create, delete as delete_handler, list, read, read_by_email};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/email/:email", get(read_by_email))
        .route("/:id", get(read).delete(delete_handler))
        .with_state(state)
}
