use crate::error::AppError;

pub fn validate_register_request(username: &str, password: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::validation("Username is required"));
    }

    if password.len() < 8 {
        return Err(AppError::validation(
            "Password must be at least 8 characters",
        ));
    }

    Ok(())
}

pub fn validate_login_request(username: &str, password: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::validation("Username is required"));
    }

    if password.trim().is_empty() {
        return Err(AppError::validation("Password is required"));
    }

    Ok(())
}
