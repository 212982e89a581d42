//! Owner identity extraction
//!
//! Token validation happens upstream at the API gateway; by the time a
//! request reaches this service the bearer value is an opaque,
//! already-validated owner identity and is trusted as-is.

use aide::OperationIo;
use axum::{
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::types::AppError;

/// Authenticated owner information extracted from the request
#[derive(Debug, Clone, OperationIo)]
pub struct AuthenticatedUser {
    /// Opaque owner identity; every storage access is scoped to it
    pub owner_id: String,
}

/// Axum extractor for the authenticated owner
///
/// Use this in handlers to pull the owner identity placed into request
/// extensions by [`auth_middleware`]:
/// ```ignore
/// async fn protected_handler(
///     user: AuthenticatedUser,
///     // ... other extractors
/// ) -> Result<impl IntoResponse, AppError> {
///     // Access user.owner_id
///     Ok("Protected content")
/// }
/// ```
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            AppError::new(
                StatusCode::UNAUTHORIZED,
                "Authentication required but user not found in request extensions",
            )
        })
    }
}

/// Bearer authentication middleware
///
/// Extracts the bearer value from the Authorization header, adds
/// [`AuthenticatedUser`] to request extensions and returns 401 when the
/// header is missing or malformed.
///
/// # Errors
///
/// - `AppError` - Missing bearer token with 401 status code
pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, AppError> {
    let owner_id = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::new(
                StatusCode::UNAUTHORIZED,
                "Authorization header must contain a valid Bearer token",
            )
        })?;

    let user = AuthenticatedUser {
        owner_id: owner_id.to_string(),
    };
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
