use bcrypt::hash;
use chrono::{Duration, Months};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::ProjectStatus,
    db::models::user::{NewUser, User},
    db::repositories::{ProjectsRepo, UsersRepo},
    error::AppError,
    services::{context::RequestContext, projects_service::ProjectsService},
    tracking::{ProjectAggregate, ProjectDraft},
};

pub const DEFAULT_USERNAME: &str = "default_user";

/// What a seeding run created.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created_user: bool,
    pub created_projects: usize,
}

pub struct SeedService;

impl SeedService {
    /// Creates the default user when there are no users and the sample
    /// projects when there are no projects. Running it again is a no-op.
    /// Everything is written in one transaction, so a failed run leaves the
    /// database as it found it.
    pub fn seed_defaults(
        conn: &mut PgConnection,
        password: &str,
        bcrypt_cost: u32,
    ) -> Result<SeedReport, AppError> {
        let report = conn.transaction::<_, AppError, _>(|conn| {
            let mut report = SeedReport::default();

            let owner = if UsersRepo::count(conn)? == 0 {
                report.created_user = true;
                Some(Self::create_default_user(conn, password, bcrypt_cost)?)
            } else {
                UsersRepo::find_by_username(conn, DEFAULT_USERNAME)?
            };

            let Some(owner) = owner else {
                tracing::debug!("Default user absent, skipping sample projects");
                return Ok(report);
            };

            if ProjectsRepo::count(conn)? == 0 {
                let ctx = RequestContext::new(owner.id);
                for (draft, status) in sample_projects(&ctx, owner.id) {
                    let mut aggregate = ProjectAggregate::create(draft, Some(owner.id), ctx.now);
                    if let Some(status) = status {
                        aggregate.set_status(status, Some(owner.id), ctx.now);
                    }
                    ProjectsService::save(conn, &ctx, &mut aggregate)?;
                    report.created_projects += 1;
                }
            }
            Ok(report)
        })?;

        tracing::info!(
            created_user = report.created_user,
            created_projects = report.created_projects,
            "Seeding finished"
        );
        Ok(report)
    }

    fn create_default_user(
        conn: &mut PgConnection,
        password: &str,
        bcrypt_cost: u32,
    ) -> Result<User, AppError> {
        let new_user = NewUser {
            id: Uuid::new_v4(),
            username: DEFAULT_USERNAME.to_string(),
            email: Some("default@example.com".to_string()),
            password_hash: hash(password, bcrypt_cost)?,
            first_name: Some("Default".to_string()),
            last_name: Some("User".to_string()),
            department: Some("Research".to_string()),
            institution: Some("Default Institution".to_string()),
        };
        Ok(UsersRepo::insert(conn, &new_user)?)
    }
}

fn sample_projects(
    ctx: &RequestContext,
    owner_id: Uuid,
) -> Vec<(ProjectDraft, Option<ProjectStatus>)> {
    let today = ctx.today();
    let months_ahead = |n: u32| today.checked_add_months(Months::new(n));
    let months_back = |n: u32| today.checked_sub_months(Months::new(n));

    vec![
        (
            ProjectDraft {
                title: "AI Research Project".to_string(),
                description: Some("Research on advanced machine learning algorithms".to_string()),
                start_date: Some(today),
                end_date: months_ahead(6),
                deadline: Some(today + Duration::days(5)),
                owner_id: Some(owner_id),
            },
            Some(ProjectStatus::InProgress),
        ),
        (
            ProjectDraft {
                title: "Climate Change Study".to_string(),
                description: Some("Analysis of global climate patterns".to_string()),
                start_date: months_ahead(1),
                end_date: months_ahead(8),
                deadline: months_ahead(8),
                owner_id: Some(owner_id),
            },
            None,
        ),
        (
            ProjectDraft {
                title: "Medical Research".to_string(),
                description: Some("Study on new treatment methods".to_string()),
                start_date: months_back(6),
                end_date: months_back(1),
                deadline: None,
                owner_id: Some(owner_id),
            },
            Some(ProjectStatus::Completed),
        ),
    ]
}
