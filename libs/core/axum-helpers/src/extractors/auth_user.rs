//! Authenticated caller extractor.

use crate::{auth::JwtClaims, errors::AppError};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::str::FromStr;

/// Claims of the authenticated caller.
///
/// Reads the [`JwtClaims`] that [`optional_jwt_auth_middleware`] or
/// [`jwt_auth_middleware`] left in the request extensions. Handlers that take
/// this extractor answer 401 when the request carried no valid token.
///
/// [`optional_jwt_auth_middleware`]: crate::auth::optional_jwt_auth_middleware
/// [`jwt_auth_middleware`]: crate::auth::jwt_auth_middleware
#[derive(Debug, Clone)]
pub struct AuthUser(pub JwtClaims);

impl AuthUser {
    /// Parse the token subject into the caller's user id.
    pub fn user_id<T: FromStr>(&self) -> Result<T, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JwtClaims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))
    }
}
