//! OpenAPI document for the users and posts routes.

use crate::error::ErrorBody;
use crate::handlers::{posts, users};
use crate::model::{Post, PostBody, User, UserCreate};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tech Challenge II API",
        description = "Tech Challenge II API Documentation",
        version = "1.0.0"
    ),
    paths(
        users::list,
        users::create,
        users::read,
        users::read_by_email,
        users::delete,
        posts::list,
        posts::read,
        posts::create,
        posts::update,
        posts::delete,
        posts::search,
    ),
    components(schemas(User, UserCreate, Post, PostBody, ErrorBody)),
    tags(
        (name = "Users", description = "User accounts"),
        (name = "Posts", description = "Posts; every route requires the email header")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /documentation/json
pub fn docs_routes() -> Router {
    Router::new().route("/documentation/json", get(openapi_json))
}
