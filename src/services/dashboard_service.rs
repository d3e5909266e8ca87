use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::dashboard::{DashboardStats, UserDashboardSummary},
    db::repositories::{ProjectsRepo, StatusHistoryRepo, UsersRepo},
    error::AppError,
    services::context::RequestContext,
    tracking::dashboard::{self, RECENT_CHANGES_LIMIT},
};

pub struct DashboardService;

impl DashboardService {
    pub fn stats(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<DashboardStats, AppError> {
        let projects = ProjectsRepo::list_all(conn)?;
        let users = UsersRepo::list_all(conn)?;
        let recent = StatusHistoryRepo::recent(conn, RECENT_CHANGES_LIMIT as i64)?;

        let stats = dashboard::summarize(&projects, &users, &recent, ctx.today());
        tracing::debug!(
            total_projects = stats.total_projects,
            upcoming = stats.upcoming_deadlines.len(),
            "Dashboard stats computed"
        );
        Ok(stats)
    }

    pub fn user_summary(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<UserDashboardSummary, AppError> {
        let user = UsersRepo::find_by_id(conn, user_id)?
            .ok_or_else(|| AppError::not_found("user"))?;
        let projects = ProjectsRepo::list_by_owner(conn, user_id)?;
        Ok(dashboard::summarize_user(&user, &projects))
    }
}
