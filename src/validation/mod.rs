use axum::{
    Json, async_trait,
    extract::FromRequest,
    http::Request,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::{db::models::api::ErrorDetail, error::AppError};

pub mod auth;
pub mod project;

/// JSON body extractor that also runs `validator` rules.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Rejected request body");
            AppError::validation("Invalid JSON format")
        })?;

        value.validate().map_err(|errors| {
            let details = error_details(&errors);
            AppError::validation_with_details(
                format!("Validation failed with {} errors", details.len()),
                details,
            )
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Flattens `validator` field errors into response error details, sorted by
/// field name.
pub fn error_details(errors: &ValidationErrors) -> Vec<ErrorDetail> {
    let mut details: Vec<ErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| ErrorDetail {
                field: Some(field.to_string()),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field: {}", field)),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

/// Reusable field rules for `#[validate(custom(...))]`.
pub mod rules {
    use validator::ValidationError;

    /// Letters, digits and `_ - . @`.
    pub fn validate_username_format(username: &str) -> Result<(), ValidationError> {
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '@'))
        {
            return Err(ValidationError::new("invalid_username_format"));
        }

        Ok(())
    }
}
