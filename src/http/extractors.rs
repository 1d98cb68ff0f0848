//! Custom Axum extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::error::ApiError;
use super::server::AppState;

/// Header carrying the admin credential.
pub const ADMIN_HEADER: &str = "x-admin-password";

/// Rejects the request with 403 unless the admin header passes the
/// configured credential check.
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let credential = parts
            .headers
            .get(ADMIN_HEADER)
            .and_then(|value| value.to_str().ok());

        if state.auth.verify(credential) {
            Ok(Self)
        } else {
            Err(ApiError::Forbidden)
        }
    }
}
