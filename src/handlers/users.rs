//! User handlers: list, create, read by id or email, delete.

use super::parse_id;
use crate::error::{AppError, ErrorBody};
use crate::extractors::JsonBody;
use crate::model::{User, UserCreate};
use crate::response::{created, ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/users",
    operation_id = "list_users",
    tag = "Users",
    summary = "List all users",
    responses((status = 200, description = "All users", body = [User]))
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.users.list().await?;
    Ok(ok(users))
}

#[utoipa::path(
    post,
    path = "/users",
    operation_id = "create_user",
    tag = "Users",
    summary = "Create a user",
    request_body = UserCreate,
    responses(
        (status = 201, description = "Created user", body = User),
        (status = 409, description = "Email already taken", body = ErrorBody),
        (status = 422, description = "Invalid fields", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserCreate>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::user_create(&body)?;
    let user = state.users.create(body).await?;
    Ok(created(user))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    operation_id = "find_user_by_id",
    tag = "Users",
    summary = "Find a user by id",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, description = "The user, or null when absent", body = User))
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let user = state.users.find_by_id(id).await?;
    Ok(ok(user))
}

#[utoipa::path(
    get,
    path = "/users/email/{email}",
    operation_id = "find_user_by_email",
    tag = "Users",
    summary = "Find a user by email",
    params(("email" = String, Path, description = "Exact email")),
    responses((status = 200, description = "The user, or null when absent", body = User))
)]
pub async fn read_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.users.find_by_email(&email).await?;
    Ok(ok(user))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    operation_id = "delete_user",
    tag = "Users",
    summary = "Delete a user",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, description = "The deleted user, or null when absent", body = User))
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let user = state.users.delete(id).await?;
    Ok(ok(user))
}
