//! Header-presence gate: post routes need an `email` header. The value is not verified against
//! stored users here; post creation checks the author separately.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

/// Header carrying the caller's email.
pub const EMAIL_HEADER: &str = "email";

/// Caller email from the `email` header. Rejects with 401 when absent or blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorEmail(pub String);

fn email_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(EMAIL_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthorEmail
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        email_from_headers(&parts.headers)
            .map(AuthorEmail)
            .ok_or(AppError::Unauthorized)
    }
}

/// Middleware run before every post handler.
pub async fn require_email(req: Request, next: Next) -> Result<Response, AppError> {
    if email_from_headers(req.headers()).is_none() {
        tracing::debug!(path = %req.uri().path(), "missing email header");
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: Option<&'static str>) -> HeaderMap {
        let mut h = HeaderMap::new();
        if let Some(v) = value {
            h.insert(EMAIL_HEADER, HeaderValue::from_static(v));
        }
        h
    }

    #[test]
    fn reads_and_trims_the_email_header() {
        assert_eq!(email_from_headers(&headers(Some(" a@x.com "))), Some("a@x.com".into()));
    }

    #[test]
    fn missing_or_blank_header_is_none() {
        assert_eq!(email_from_headers(&headers(None)), None);
        assert_eq!(email_from_headers(&headers(Some("   "))), None);
    }
}
