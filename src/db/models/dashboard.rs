use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::enums::{DeadlineStatus, ProjectStatus};
use crate::db::models::user::UserBasicInfo;

// Dashboard API DTOs
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_projects: i64,
    pub active_projects: i64,
    /// Always 0: there is no review subsystem.
    pub pending_reviews: i64,
    pub status_breakdown: Vec<StatusCount>,
    pub recent_status_changes: Vec<StatusChange>,
    pub upcoming_deadlines: Vec<UpcomingDeadline>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub count: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub project_id: Uuid,
    pub project_title: String,
    pub old_status: Option<ProjectStatus>,
    pub new_status: ProjectStatus,
    pub changed_at: DateTime<Utc>,
    /// Username of the acting user, `None` when it cannot be resolved.
    pub changed_by: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UpcomingDeadline {
    pub project_id: Uuid,
    pub project_title: String,
    pub deadline: NaiveDate,
    pub days_until_deadline: i64,
    pub status: DeadlineStatus,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UserDashboardSummary {
    pub user: UserBasicInfo,
    pub active_project_count: i64,
    pub total_projects: i64,
    pub review_count: i64,
}
