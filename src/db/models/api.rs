use serde::Serialize;

// Uniform response envelope for every endpoint
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    fn build(success: bool, code: u16, message: &str, data: Option<T>) -> Self {
        Self {
            success,
            code,
            message: message.to_string(),
            data,
            meta: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, message: &str, error_code: &str, field: Option<String>) -> Self {
        let mut response = Self::build(false, code, message, None);
        response.errors = Some(vec![ErrorDetail {
            field,
            code: error_code.to_string(),
            message: message.to_string(),
        }]);
        response
    }

    pub fn success(data: T, message: &str) -> Self {
        Self::build(true, 200, message, Some(data))
    }

    pub fn success_with_count(data: T, message: &str, total_count: i64) -> Self {
        let mut response = Self::build(true, 200, message, Some(data));
        response.meta = Some(ResponseMeta {
            total_count: Some(total_count),
        });
        response
    }

    pub fn created(data: T, message: &str) -> Self {
        Self::build(true, 201, message, Some(data))
    }

    pub fn ok(message: &str) -> Self {
        Self::build(true, 200, message, None)
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        let mut response = Self::build(false, 400, "Validation failed", None);
        response.errors = Some(errors);
        response
    }

    pub fn bad_request(message: &str) -> Self {
        Self::failure(400, message, "BAD_REQUEST", None)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::failure(401, message, "UNAUTHORIZED", None)
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, message, "NOT_FOUND", None)
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::failure(409, message, error_code, field)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, message, "INTERNAL_ERROR", None)
    }
}

// Business error codes
pub mod error_codes {
    pub const USER_USERNAME_EXISTS: &str = "USER_USERNAME_EXISTS";
    pub const USER_EMAIL_EXISTS: &str = "USER_EMAIL_EXISTS";
    pub const PROJECT_CONCURRENT_UPDATE: &str = "PROJECT_CONCURRENT_UPDATE";
}
