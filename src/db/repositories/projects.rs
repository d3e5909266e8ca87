use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::ProjectStatus;
use crate::db::models::project::{Project, ProjectChangeset};

pub struct ProjectsRepo;

impl ProjectsRepo {
    pub fn find_by_id(conn: &mut PgConnection, project_id: Uuid) -> Result<Option<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(id.eq(project_id))
            .select(Project::as_select())
            .first::<Project>(conn)
            .optional()
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .select(Project::as_select())
            .order(created_at.desc())
            .load::<Project>(conn)
    }

    pub fn list_by_owner(conn: &mut PgConnection, owner: Uuid) -> Result<Vec<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(owner_id.eq(owner))
            .select(Project::as_select())
            .order(created_at.desc())
            .load::<Project>(conn)
    }

    pub fn list_by_status(conn: &mut PgConnection, target: ProjectStatus) -> Result<Vec<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(status.eq(target))
            .select(Project::as_select())
            .order(created_at.desc())
            .load::<Project>(conn)
    }

    /// Projects that have a deadline, earliest first.
    pub fn list_with_deadline(conn: &mut PgConnection) -> Result<Vec<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(deadline.is_not_null())
            .select(Project::as_select())
            .order(deadline.asc())
            .load::<Project>(conn)
    }

    pub fn count(conn: &mut PgConnection) -> Result<i64, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects.count().get_result(conn)
    }

    pub fn insert(conn: &mut PgConnection, project: &Project) -> Result<Project, diesel::result::Error> {
        diesel::insert_into(crate::schema::projects::table)
            .values(project)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    /// Writes the row only if its stored status is still `expected_status`.
    /// Returns `None` when the row is gone or its status moved on.
    pub fn update(
        conn: &mut PgConnection,
        project: &Project,
        expected_status: ProjectStatus,
    ) -> Result<Option<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::update(
            projects
                .filter(id.eq(project.id))
                .filter(status.eq(expected_status)),
        )
        .set(ProjectChangeset::from(project))
        .returning(Project::as_returning())
        .get_result(conn)
        .optional()
    }

    pub fn exists(conn: &mut PgConnection, project_id: Uuid) -> Result<bool, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::select(diesel::dsl::exists(projects.filter(id.eq(project_id)))).get_result(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, project_id: Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::delete(projects.filter(id.eq(project_id))).execute(conn)
    }
}
