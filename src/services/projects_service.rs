use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::{
    db::enums::{DeadlineStatus, ProjectStatus},
    db::models::api::error_codes,
    db::models::project::{
        CreateProjectRequest, Project, ProjectDetail, UpdateProjectRequest,
    },
    db::models::status_history::StatusHistory,
    db::repositories::{ProjectsRepo, StatusHistoryRepo, UsersRepo},
    error::AppError,
    services::context::RequestContext,
    tracking::{DetailChanges, ProjectAggregate, ProjectDraft},
    validation::project::{validate_create_project, validate_date_range, validate_title},
};

pub struct ProjectsService;

impl ProjectsService {
    pub fn list(conn: &mut PgConnection, ctx: &RequestContext) -> Result<Vec<Project>, AppError> {
        let projects = ProjectsRepo::list_all(conn)?;
        Ok(refreshed(projects, ctx))
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> Result<ProjectDetail, AppError> {
        let aggregate = Self::load(conn, ctx, project_id)?;
        Ok(detail(aggregate))
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateProjectRequest,
    ) -> Result<ProjectDetail, AppError> {
        validate_create_project(&req.title, req.start_date, req.end_date)?;

        let owner_id = req.owner_id.unwrap_or(ctx.user_id);
        if owner_id != ctx.user_id && UsersRepo::find_by_id(conn, owner_id)?.is_none() {
            return Err(AppError::not_found("user"));
        }

        let mut aggregate = ProjectAggregate::create(
            ProjectDraft {
                title: req.title.trim().to_string(),
                description: req.description.clone(),
                start_date: req.start_date,
                end_date: req.end_date,
                deadline: req.deadline,
                owner_id: Some(owner_id),
            },
            Some(ctx.user_id),
            ctx.now,
        );
        Self::save(conn, ctx, &mut aggregate)?;

        tracing::info!(
            project_id = %aggregate.id(),
            owner_id = %owner_id,
            deadline_status = %aggregate.project().deadline_status,
            "Project created"
        );
        Ok(detail(aggregate))
    }

    /// Applies a partial update. A status change in the same request is
    /// recorded in the ledger like any other.
    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
        req: &UpdateProjectRequest,
    ) -> Result<ProjectDetail, AppError> {
        if let Some(title) = req.title.as_deref() {
            validate_title(title)?;
        }

        let mut aggregate = Self::load(conn, ctx, project_id)?;
        aggregate.apply_details(DetailChanges {
            title: req.title.as_ref().map(|t| t.trim().to_string()),
            description: req.description.clone(),
            start_date: req.start_date,
            end_date: req.end_date,
            reminder_sent: req.reminder_sent,
        });
        let project = aggregate.project();
        validate_date_range(project.start_date, project.end_date)?;

        if let Some(deadline) = req.deadline {
            aggregate.set_deadline(deadline, ctx.today());
        }
        if let Some(status) = req.status {
            Self::transition(&mut aggregate, ctx, status);
        }
        aggregate.touch(ctx.now);

        Self::save(conn, ctx, &mut aggregate)?;
        Ok(detail(aggregate))
    }

    pub fn change_status(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
        status: ProjectStatus,
    ) -> Result<ProjectDetail, AppError> {
        let mut aggregate = Self::load(conn, ctx, project_id)?;
        if Self::transition(&mut aggregate, ctx, status) {
            Self::save(conn, ctx, &mut aggregate)?;
        }
        Ok(detail(aggregate))
    }

    /// Removes the project. Its ledger goes with it.
    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> Result<(), AppError> {
        if ProjectsRepo::delete_by_id(conn, project_id)? == 0 {
            return Err(AppError::not_found("project"));
        }
        tracing::info!(project_id = %project_id, deleted_by = %ctx.user_id, "Project deleted");
        Ok(())
    }

    pub fn list_by_owner(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        owner_id: Uuid,
    ) -> Result<Vec<Project>, AppError> {
        if UsersRepo::find_by_id(conn, owner_id)?.is_none() {
            return Err(AppError::not_found("user"));
        }
        let projects = ProjectsRepo::list_by_owner(conn, owner_id)?;
        Ok(refreshed(projects, ctx))
    }

    pub fn list_by_status(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, AppError> {
        let projects = ProjectsRepo::list_by_status(conn, status)?;
        Ok(refreshed(projects, ctx))
    }

    pub fn status_history(
        conn: &mut PgConnection,
        project_id: Uuid,
    ) -> Result<Vec<StatusHistory>, AppError> {
        if ProjectsRepo::find_by_id(conn, project_id)?.is_none() {
            return Err(AppError::not_found("project"));
        }
        Ok(StatusHistoryRepo::list_by_project(conn, project_id)?)
    }

    /// Projects whose deadline is within the approaching window, earliest first.
    pub fn upcoming_deadlines(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<Project>, AppError> {
        Self::with_deadline_status(conn, ctx, DeadlineStatus::Approaching)
    }

    pub fn overdue(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<Project>, AppError> {
        Self::with_deadline_status(conn, ctx, DeadlineStatus::Overdue)
    }

    fn with_deadline_status(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        wanted: DeadlineStatus,
    ) -> Result<Vec<Project>, AppError> {
        let projects = ProjectsRepo::list_with_deadline(conn)?;
        Ok(refreshed(projects, ctx)
            .into_iter()
            .filter(|project| project.deadline_status == wanted)
            .collect())
    }

    fn transition(
        aggregate: &mut ProjectAggregate,
        ctx: &RequestContext,
        status: ProjectStatus,
    ) -> bool {
        let from = aggregate.status();
        let changed = aggregate.set_status(status, Some(ctx.user_id), ctx.now);
        if changed {
            tracing::info!(
                project_id = %aggregate.id(),
                from = %from,
                to = %status,
                changed_by = %ctx.user_id,
                "Project status changed"
            );
        } else {
            tracing::debug!(project_id = %aggregate.id(), status = %status, "Status unchanged");
        }
        changed
    }

    pub(crate) fn load(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> Result<ProjectAggregate, AppError> {
        let project = ProjectsRepo::find_by_id(conn, project_id)?
            .ok_or_else(|| AppError::not_found("project"))?;
        let history = StatusHistoryRepo::list_by_project(conn, project_id)?;

        let mut aggregate = ProjectAggregate::from_parts(project, history);
        aggregate.refresh_deadline_status(ctx.today());
        Ok(aggregate)
    }

    /// Writes the project row and its pending history in one transaction.
    /// An existing row is only overwritten while it still has the status the
    /// aggregate was loaded with.
    pub(crate) fn save(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        aggregate: &mut ProjectAggregate,
    ) -> Result<(), AppError> {
        aggregate.refresh_deadline_status(ctx.today());
        let project_id = aggregate.id();

        let stored = conn.transaction::<_, AppError, _>(|conn| {
            let stored = match aggregate.stored_status() {
                None => ProjectsRepo::insert(conn, aggregate.project())
                    .map_err(|e| save_error(project_id, e))?,
                Some(expected) => ProjectsRepo::update(conn, aggregate.project(), expected)
                    .map_err(|e| save_error(project_id, e))?
                    .ok_or_else(|| stale_write(conn, project_id, expected))?,
            };
            StatusHistoryRepo::insert_many(conn, aggregate.pending_history())
                .map_err(|e| save_error(project_id, e))?;
            Ok(stored)
        })?;

        aggregate.mark_persisted(stored);
        Ok(())
    }
}

const PROJECT_FKEY: &str = "status_history_project_id_fkey";

fn concurrent_update(project_id: Uuid) -> AppError {
    tracing::warn!(project_id = %project_id, "Concurrent status change rejected");
    AppError::conflict_with_code(
        "Project was modified concurrently, reload and retry",
        Some("status".to_string()),
        error_codes::PROJECT_CONCURRENT_UPDATE,
    )
}

/// Explains why a conditional update matched no row.
fn stale_write(conn: &mut PgConnection, project_id: Uuid, expected: ProjectStatus) -> AppError {
    match ProjectsRepo::exists(conn, project_id) {
        Ok(false) => AppError::not_found("project"),
        Ok(true) => {
            tracing::debug!(project_id = %project_id, expected = %expected, "Stored status moved on");
            concurrent_update(project_id)
        }
        Err(e) => AppError::from(e),
    }
}

fn save_error(project_id: Uuid, error: DieselError) -> AppError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            concurrent_update(project_id)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            if info.constraint_name() == Some(PROJECT_FKEY) {
                AppError::not_found("project")
            } else {
                AppError::not_found("user")
            }
        }
        DieselError::NotFound => AppError::not_found("project"),
        other => AppError::from(other),
    }
}

fn refreshed(projects: Vec<Project>, ctx: &RequestContext) -> Vec<Project> {
    projects
        .into_iter()
        .map(|project| {
            let mut aggregate = ProjectAggregate::from_parts(project, Vec::new());
            aggregate.refresh_deadline_status(ctx.today());
            aggregate.into_parts().0
        })
        .collect()
}

fn detail(aggregate: ProjectAggregate) -> ProjectDetail {
    let (project, status_history) = aggregate.into_parts();
    ProjectDetail {
        project,
        status_history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::user::NewUser;
    use crate::db::test_connection;
    use chrono::{Duration, TimeZone, Utc};
    use diesel::result::DatabaseErrorInformation;

    /// Driver error details carrying only a constraint name.
    struct Violation(&'static str);

    impl DatabaseErrorInformation for Violation {
        fn message(&self) -> &str {
            "violates foreign key constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn fk_violation(constraint: &'static str) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new(Violation(constraint)),
        )
    }

    fn not_found_resource(error: AppError) -> String {
        match error {
            AppError::NotFound { resource } => resource,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn insert_user(conn: &mut PgConnection) -> Uuid {
        let id = Uuid::new_v4();
        UsersRepo::insert(
            conn,
            &NewUser {
                id,
                username: format!("writer_{}", &id.simple().to_string()[..8]),
                email: None,
                password_hash: "not-a-real-hash".to_string(),
                first_name: None,
                last_name: None,
                department: None,
                institution: None,
            },
        )
        .unwrap();
        id
    }

    #[test]
    fn unique_violation_becomes_conflict() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_string()),
        );
        match save_error(Uuid::new_v4(), error) {
            AppError::Conflict { code, .. } => {
                assert_eq!(code.as_deref(), Some(error_codes::PROJECT_CONCURRENT_UPDATE))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_row_becomes_not_found() {
        assert!(matches!(
            save_error(Uuid::new_v4(), DieselError::NotFound),
            AppError::NotFound { .. }
        ));
    }

    #[test]
    fn listed_projects_are_reclassified() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let aggregate = ProjectAggregate::create(
            ProjectDraft {
                title: "Stale".to_string(),
                deadline: Some(created.date_naive() + Duration::days(10)),
                ..Default::default()
            },
            None,
            created,
        );
        assert_eq!(aggregate.project().deadline_status, DeadlineStatus::OnTrack);

        let ctx = RequestContext {
            user_id: Uuid::new_v4(),
            now: created + Duration::days(11),
        };
        let projects = refreshed(vec![aggregate.project().clone()], &ctx);
        assert_eq!(projects[0].deadline_status, DeadlineStatus::Overdue);
    }

    #[test]
    fn vanished_project_reference_is_not_a_missing_user() {
        let resource = not_found_resource(save_error(Uuid::new_v4(), fk_violation(PROJECT_FKEY)));
        assert_eq!(resource, "project");

        for constraint in ["projects_owner_id_fkey", "status_history_changed_by_id_fkey"] {
            let resource = not_found_resource(save_error(Uuid::new_v4(), fk_violation(constraint)));
            assert_eq!(resource, "user");
        }
    }

    #[test]
    #[ignore = "requires database"]
    fn stale_detail_update_cannot_revert_status() {
        let mut conn = test_connection();
        let user_id = insert_user(&mut conn);
        let ctx = RequestContext::new(user_id);

        let created = ProjectsService::create(
            &mut conn,
            &ctx,
            &CreateProjectRequest {
                title: "Contended".to_string(),
                description: None,
                start_date: None,
                end_date: None,
                deadline: None,
                owner_id: None,
            },
        )
        .unwrap();
        let project_id = created.project.id;

        let mut stale = ProjectsService::load(&mut conn, &ctx, project_id).unwrap();

        ProjectsService::change_status(&mut conn, &ctx, project_id, ProjectStatus::InProgress)
            .unwrap();

        stale.apply_details(DetailChanges {
            title: Some("Renamed".to_string()),
            ..Default::default()
        });
        match ProjectsService::save(&mut conn, &ctx, &mut stale) {
            Err(AppError::Conflict { code, .. }) => {
                assert_eq!(code.as_deref(), Some(error_codes::PROJECT_CONCURRENT_UPDATE))
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let stored = ProjectsService::get(&mut conn, &ctx, project_id).unwrap();
        assert_eq!(stored.project.status, ProjectStatus::InProgress);
        assert_eq!(stored.project.title, "Contended");
        let last = stored.status_history.last().unwrap();
        assert_eq!(last.new_status, stored.project.status);
    }

    #[test]
    #[ignore = "requires database"]
    fn saving_a_deleted_project_is_not_found() {
        let mut conn = test_connection();
        let user_id = insert_user(&mut conn);
        let ctx = RequestContext::new(user_id);

        let created = ProjectsService::create(
            &mut conn,
            &ctx,
            &CreateProjectRequest {
                title: "Short lived".to_string(),
                description: None,
                start_date: None,
                end_date: None,
                deadline: None,
                owner_id: None,
            },
        )
        .unwrap();
        let mut loaded = ProjectsService::load(&mut conn, &ctx, created.project.id).unwrap();
        ProjectsService::delete(&mut conn, &ctx, created.project.id).unwrap();

        loaded.set_status(ProjectStatus::OnHold, Some(user_id), ctx.now);
        let error = ProjectsService::save(&mut conn, &ctx, &mut loaded).unwrap_err();
        assert_eq!(not_found_resource(error), "project");
    }
}
