//! Post handlers. Every route sits behind the `email` header gate.

use super::parse_id;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AuthorEmail, JsonBody};
use crate::model::{Post, PostBody};
use crate::response::{created, ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use std::collections::HashMap;

#[utoipa::path(
    get,
    path = "/posts",
    operation_id = "list_posts",
    tag = "Posts",
    summary = "List all posts",
    params(("email" = String, Header, description = "Caller email")),
    responses(
        (status = 200, description = "All posts", body = [Post]),
        (status = 401, description = "Missing email header", body = ErrorBody)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let posts = state.posts.list().await?;
    Ok(ok(posts))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    operation_id = "find_post_by_id",
    tag = "Posts",
    summary = "Find post by id",
    params(
        ("id" = i32, Path, description = "Post id"),
        ("email" = String, Header, description = "Caller email")
    ),
    responses((status = 200, description = "The post, or null when absent", body = Post))
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let post = state.posts.find_by_id(id).await?;
    Ok(ok(post))
}

#[utoipa::path(
    post,
    path = "/posts",
    operation_id = "create_post",
    tag = "Posts",
    summary = "Create a post",
    params(("email" = String, Header, description = "Author email; must belong to a user")),
    request_body = PostBody,
    responses(
        (status = 201, description = "Created post", body = Post),
        (status = 422, description = "Unknown author or invalid fields", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AuthorEmail(email): AuthorEmail,
    JsonBody(body): JsonBody<PostBody>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::post_body(&body)?;
    let post = state.posts.create(body.with_author(email)).await?;
    Ok(created(post))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    operation_id = "update_post",
    tag = "Posts",
    summary = "Update a post",
    params(
        ("id" = i32, Path, description = "Post id"),
        ("email" = String, Header, description = "Caller email")
    ),
    request_body = PostBody,
    responses(
        (status = 200, description = "Updated post", body = Post),
        (status = 404, description = "No such post", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<PostBody>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    RequestValidator::post_body(&body)?;
    let post = state.posts.update(id, body.into()).await?;
    Ok(ok(post))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    operation_id = "delete_post",
    tag = "Posts",
    summary = "Delete a post",
    params(
        ("id" = i32, Path, description = "Post id"),
        ("email" = String, Header, description = "Caller email")
    ),
    responses((status = 200, description = "The deleted post, or null when absent", body = Post))
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let post = state.posts.delete(id).await?;
    Ok(ok(post))
}

#[utoipa::path(
    get,
    path = "/posts/search",
    operation_id = "search_posts",
    tag = "Posts",
    summary = "Search post by title or content",
    params(
        ("search" = String, Query, description = "Case-insensitive substring"),
        ("email" = String, Header, description = "Caller email")
    ),
    responses(
        (status = 200, description = "Matching posts", body = [Post]),
        (status = 400, description = "Missing search parameter", body = ErrorBody)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let search = params
        .get("search")
        .ok_or_else(|| AppError::BadRequest("search is required".into()))?;
    let posts = state.posts.find_by_title_or_content(search).await?;
    Ok(ok(posts))
}
