// ABOUTME: Request actor extraction
// ABOUTME: Explicit per-request user context instead of ambient identity

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Header carrying the acting user's id. Session storage itself is an
/// external collaborator; the API only needs to know who acted.
pub const USER_ID_HEADER: &str = "x-user-id";

const DEFAULT_USER_ID: &str = "default-user";

/// The actor behind the current request, passed explicitly to handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(DEFAULT_USER_ID)
            .to_string();

        Ok(CurrentUser { id })
    }
}
