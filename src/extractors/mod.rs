//! Request extractors and the header gate for post routes.

mod auth;
mod json;

pub use auth::{require_email, AuthorEmail, EMAIL_HEADER};
pub use json::JsonBody;
