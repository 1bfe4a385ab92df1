//! Caller identity extraction.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common::Username;

use crate::error::ApiError;

/// Name of the header carrying the caller identity.
pub const USER_NAME_HEADER: &str = "X-User-Name";

/// Extractor for the `X-User-Name` header.
///
/// The value is an opaque identity string forwarded verbatim to the ledger;
/// the gateway performs no authentication of its own. A missing or empty
/// header is a 400.
pub struct CallerIdentity(pub Username);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_NAME_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|name| !name.is_empty())
            .map(|name| CallerIdentity(Username::new(name)))
            .ok_or_else(|| ApiError::BadRequest(format!("{USER_NAME_HEADER} header is required")))
    }
}
