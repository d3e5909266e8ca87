use crate::db::models::api::{ApiResponse, ErrorDetail};
use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Authentication error: {message}")]
    Auth { message: String },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<ErrorDetail>,
    },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        field: Option<String>,
        code: Option<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth { .. } | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Config(_)
            | AppError::Bcrypt(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let response = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                ApiResponse::<()>::internal_error("Database error")
            }
            AppError::Pool(ref e) => {
                tracing::error!("Connection pool error: {}", e);
                ApiResponse::<()>::internal_error("Connection error")
            }
            AppError::Auth { ref message } => ApiResponse::<()>::unauthorized(message),
            AppError::Validation {
                ref message,
                ref details,
            } => {
                if details.is_empty() {
                    ApiResponse::<()>::bad_request(message)
                } else {
                    ApiResponse::<()>::validation_error(details.clone())
                }
            }
            AppError::NotFound { ref resource } => {
                ApiResponse::<()>::not_found(&format!("{} not found", resource))
            }
            AppError::Conflict {
                ref message,
                ref field,
                ref code,
            } => ApiResponse::<()>::conflict(message, field.clone(), code.as_deref().unwrap_or("CONFLICT")),
            AppError::Config(ref e) => {
                tracing::error!("Configuration error: {}", e);
                ApiResponse::<()>::internal_error("Configuration error")
            }
            AppError::Jwt(ref e) => {
                tracing::debug!("JWT error: {}", e);
                ApiResponse::<()>::unauthorized("Invalid token")
            }
            AppError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {}", e);
                ApiResponse::<()>::internal_error("Password processing error")
            }
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                ApiResponse::<()>::internal_error(message)
            }
        };

        (status, Json(response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

// Convenience constructors
impl AppError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: Vec<ErrorDetail>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict_with_code(
        message: impl Into<String>,
        field: Option<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::Conflict {
            message: message.into(),
            field,
            code: Some(code.into()),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_client_statuses() {
        assert_eq!(AppError::not_found("project").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::validation("bad").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::conflict_with_code("dup", None, "X").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::auth("nope").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::from(diesel::result::Error::NotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn into_response_keeps_status() {
        let response = AppError::not_found("project").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
