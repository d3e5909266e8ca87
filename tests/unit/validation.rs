use chrono::NaiveDate;
use research_tracker::db::models::{CreateProjectRequest, RegisterRequest};
use research_tracker::error::AppError;
use research_tracker::validation::project::validate_create_project;
use validator::Validate;

#[test]
fn validate_create_project_rules() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 10);
    let end = NaiveDate::from_ymd_opt(2024, 1, 5);

    assert!(validate_create_project("Alpha", start, start).is_ok());
    assert!(matches!(
        validate_create_project(" ", None, None),
        Err(AppError::Validation { .. })
    ));
    assert!(validate_create_project("Alpha", start, end).is_err());
}

#[test]
fn long_titles_fail_field_validation() {
    let request: CreateProjectRequest =
        serde_json::from_value(serde_json::json!({ "title": "x".repeat(256) })).unwrap();
    assert!(request.validate().is_err());
}

#[test]
fn register_request_accepts_well_formed_input() {
    let request: RegisterRequest = serde_json::from_value(serde_json::json!({
        "username": "marie.curie",
        "password": "radium1898",
        "email": "marie@example.org",
        "department": "Chemistry"
    }))
    .unwrap();
    assert!(request.validate().is_ok());
}
