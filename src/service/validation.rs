//! Field rules applied to request bodies before they reach a use case.

use crate::error::AppError;
use crate::model::{PostBody, UserCreate};

const USERNAME_MAX: usize = 100;
const EMAIL_MAX: usize = 254;
const TITLE_MAX: usize = 200;

pub struct RequestValidator;

impl RequestValidator {
    pub fn user_create(body: &UserCreate) -> Result<(), AppError> {
        require_text("username", &body.username, USERNAME_MAX)?;
        validate_email("email", &body.email)
    }

    /// Content may be empty; title may not.
    pub fn post_body(body: &PostBody) -> Result<(), AppError> {
        require_text("title", &body.title, TITLE_MAX)
    }
}

fn require_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

fn validate_email(field: &str, value: &str) -> Result<(), AppError> {
    if !value.contains('@') || value.len() < 3 {
        return Err(AppError::Validation(format!("{} must be a valid email", field)));
    }
    if value.len() > EMAIL_MAX {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, EMAIL_MAX
        )));
    }
    Ok(())
}
