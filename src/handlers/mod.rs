//! HTTP handlers for users and posts.

pub mod posts;
pub mod users;

use crate::error::AppError;

/// Parse a path id. Anything but an integer is a bad request.
pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}
