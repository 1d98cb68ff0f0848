//! API error type with IntoResponse.
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::application::AppError;
use crate::domain::ParseMonthError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request payload or query failed validation (400)
    Validation { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Admin credential missing or wrong (403)
    Forbidden,

    /// Mutation attempted on a closed month (400)
    MonthClosed { month: String },

    /// Storage or other internal failure (500, logged)
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": message
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({
                    "error": "forbidden",
                    "message": "admin access denied"
                }),
            ),
            Self::MonthClosed { month } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "month_closed",
                    "message": format!("month {} is closed, changes are blocked", month)
                }),
            ),
            Self::Internal(e) => {
                // Log the actual error, return a generic message
                tracing::error!("Internal error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::MonthClosed(month) => Self::MonthClosed {
                month: month.to_string(),
            },
            AppError::ExpenseNotFound(id) => Self::NotFound {
                resource: "expense",
                id: id.to_string(),
            },
            AppError::CategoryNotFound(id) => Self::Validation {
                message: format!("category {} does not exist", id),
            },
            AppError::CategoryAlreadyExists(name) => Self::Validation {
                message: format!("category '{}' already exists", name),
            },
            AppError::InvalidCategoryName(reason) | AppError::InvalidAmount(reason) => {
                Self::Validation { message: reason }
            }
            AppError::Database(e) => Self::Internal(e),
        }
    }
}

impl From<ParseMonthError> for ApiError {
    fn from(e: ParseMonthError) -> Self {
        Self::Validation {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation {
            message: "bad input".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::NotFound {
            resource: "expense",
            id: "42".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn forbidden_is_403() {
        let err = ApiError::Forbidden;
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn month_closed_is_400() {
        let err = ApiError::MonthClosed {
            month: "2024-05".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
