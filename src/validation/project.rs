use chrono::NaiveDate;

use crate::error::AppError;

pub fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Project title is required"));
    }
    Ok(())
}

/// A project may not end before it starts.
pub fn validate_date_range(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(AppError::validation("End date cannot be before start date"));
        }
    }
    Ok(())
}

pub fn validate_create_project(
    title: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), AppError> {
    validate_title(title)?;
    validate_date_range(start_date, end_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(validate_create_project("   ", None, None).is_err());
        assert!(validate_create_project("Survey", None, None).is_ok());
    }

    #[test]
    fn end_before_start_is_rejected() {
        assert!(validate_date_range(Some(day(10)), Some(day(9))).is_err());
        assert!(validate_date_range(Some(day(10)), Some(day(10))).is_ok());
        assert!(validate_date_range(None, Some(day(1))).is_ok());
    }
}
