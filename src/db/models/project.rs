use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::{DeadlineStatus, ProjectStatus};
use crate::db::models::status_history::StatusHistory;

// Project models
#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub deadline_status: DeadlineStatus,
    pub reminder_sent: bool,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Every mutable column of a project row. `None` writes NULL.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectChangeset<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub deadline_status: DeadlineStatus,
    pub reminder_sent: bool,
    pub owner_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Project> for ProjectChangeset<'a> {
    fn from(project: &'a Project) -> Self {
        Self {
            title: &project.title,
            description: project.description.as_deref(),
            status: project.status,
            start_date: project.start_date,
            end_date: project.end_date,
            deadline: project.deadline,
            deadline_status: project.deadline_status,
            reminder_sent: project.reminder_sent,
            owner_id: project.owner_id,
            updated_at: project.updated_at,
        }
    }
}

// Project API DTOs
#[derive(Deserialize, Validate, Debug, Clone)]
pub struct CreateProjectRequest {
    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    /// Defaults to the authenticated user.
    pub owner_id: Option<Uuid>,
}

/// Partial update. For nullable columns an explicit `null` clears the value
/// while an absent key leaves it untouched.
#[derive(Deserialize, Validate, Debug, Clone, Default)]
pub struct UpdateProjectRequest {
    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub deadline: Option<Option<NaiveDate>>,
    pub reminder_sent: Option<bool>,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct ChangeStatusRequest {
    pub status: ProjectStatus,
}

/// A project together with its full status ledger.
#[derive(Serialize, Debug, Clone)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub status_history: Vec<StatusHistory>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_null_from_missing() {
        let req: UpdateProjectRequest =
            serde_json::from_str(r#"{"deadline": null, "title": "Renamed"}"#).unwrap();
        assert_eq!(req.deadline, Some(None));
        assert_eq!(req.description, None);
        assert_eq!(req.title.as_deref(), Some("Renamed"));

        let req: UpdateProjectRequest =
            serde_json::from_str(r#"{"deadline": "2024-03-01", "status": "ON_HOLD"}"#).unwrap();
        assert_eq!(
            req.deadline,
            Some(Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()))
        );
        assert_eq!(req.status, Some(ProjectStatus::OnHold));
    }
}
