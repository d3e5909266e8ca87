//! Read-only reductions over projects, users and history for the dashboard.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::enums::ProjectStatus;
use crate::db::models::dashboard::{
    DashboardStats, StatusChange, StatusCount, UpcomingDeadline, UserDashboardSummary,
};
use crate::db::models::project::Project;
use crate::db::models::status_history::StatusHistory;
use crate::db::models::user::{User, UserBasicInfo};
use crate::tracking::deadline;

/// Number of status changes shown on the dashboard.
pub const RECENT_CHANGES_LIMIT: usize = 10;

pub fn summarize(
    projects: &[Project],
    users: &[User],
    recent_history: &[StatusHistory],
    today: NaiveDate,
) -> DashboardStats {
    DashboardStats {
        total_users: users.len() as i64,
        total_projects: projects.len() as i64,
        active_projects: count_with_status(projects, ProjectStatus::InProgress),
        pending_reviews: 0,
        status_breakdown: status_breakdown(projects),
        recent_status_changes: recent_status_changes(projects, users, recent_history),
        upcoming_deadlines: upcoming_deadlines(projects, today),
    }
}

pub fn summarize_user(user: &User, projects: &[Project]) -> UserDashboardSummary {
    let owned: Vec<&Project> = projects
        .iter()
        .filter(|project| project.owner_id == Some(user.id))
        .collect();

    UserDashboardSummary {
        user: UserBasicInfo::from(user),
        active_project_count: owned
            .iter()
            .filter(|project| project.status == ProjectStatus::InProgress)
            .count() as i64,
        total_projects: owned.len() as i64,
        review_count: 0,
    }
}

/// Project counts for every status, in declaration order.
pub fn status_breakdown(projects: &[Project]) -> Vec<StatusCount> {
    ProjectStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            count: count_with_status(projects, status),
        })
        .collect()
}

/// The newest [`RECENT_CHANGES_LIMIT`] entries, newest first.
pub fn recent_status_changes(
    projects: &[Project],
    users: &[User],
    history: &[StatusHistory],
) -> Vec<StatusChange> {
    let titles: HashMap<Uuid, &str> = projects
        .iter()
        .map(|project| (project.id, project.title.as_str()))
        .collect();
    let usernames: HashMap<Uuid, &str> = users
        .iter()
        .map(|user| (user.id, user.username.as_str()))
        .collect();

    let mut newest_first: Vec<&StatusHistory> = history.iter().collect();
    newest_first.sort_by(|a, b| {
        b.changed_at
            .cmp(&a.changed_at)
            .then_with(|| b.seq.cmp(&a.seq))
    });

    newest_first
        .into_iter()
        .filter_map(|entry| {
            let Some(title) = titles.get(&entry.project_id) else {
                tracing::warn!(
                    project_id = %entry.project_id,
                    history_id = %entry.id,
                    "Status change references an unknown project"
                );
                return None;
            };

            let changed_by = entry.changed_by_id.and_then(|user_id| {
                let name = usernames.get(&user_id).map(|name| name.to_string());
                if name.is_none() {
                    tracing::debug!(user_id = %user_id, "Status change author not found");
                }
                name
            });

            Some(StatusChange {
                project_id: entry.project_id,
                project_title: title.to_string(),
                old_status: entry.old_status,
                new_status: entry.new_status,
                changed_at: entry.changed_at,
                changed_by,
            })
        })
        .take(RECENT_CHANGES_LIMIT)
        .collect()
}

/// Projects whose deadline is approaching or already passed, earliest
/// deadline first.
pub fn upcoming_deadlines(projects: &[Project], today: NaiveDate) -> Vec<UpcomingDeadline> {
    let mut upcoming: Vec<UpcomingDeadline> = projects
        .iter()
        .filter_map(|project| {
            let due = project.deadline?;
            let status = deadline::classify(Some(due), today);
            status.needs_attention().then(|| UpcomingDeadline {
                project_id: project.id,
                project_title: project.title.clone(),
                deadline: due,
                days_until_deadline: deadline::days_until(due, today),
                status,
            })
        })
        .collect();
    upcoming.sort_by_key(|item| item.deadline);
    upcoming
}

fn count_with_status(projects: &[Project], status: ProjectStatus) -> i64 {
    projects
        .iter()
        .filter(|project| project.status == status)
        .count() as i64
}
