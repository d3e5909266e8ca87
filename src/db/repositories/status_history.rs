use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::status_history::StatusHistory;

/// Storage for ledger rows. Append and read only.
pub struct StatusHistoryRepo;

impl StatusHistoryRepo {
    pub fn insert_many(conn: &mut PgConnection, entries: &[StatusHistory]) -> Result<usize, diesel::result::Error> {
        if entries.is_empty() {
            return Ok(0);
        }
        diesel::insert_into(crate::schema::status_history::table)
            .values(entries)
            .execute(conn)
    }

    /// A project's ledger in insertion order.
    pub fn list_by_project(conn: &mut PgConnection, target_project: Uuid) -> Result<Vec<StatusHistory>, diesel::result::Error> {
        use crate::schema::status_history::dsl::*;
        status_history
            .filter(project_id.eq(target_project))
            .select(StatusHistory::as_select())
            .order(seq.asc())
            .load::<StatusHistory>(conn)
    }

    /// Most recent entries across all projects, newest first.
    pub fn recent(conn: &mut PgConnection, limit: i64) -> Result<Vec<StatusHistory>, diesel::result::Error> {
        use crate::schema::status_history::dsl::*;
        status_history
            .select(StatusHistory::as_select())
            .order((changed_at.desc(), seq.desc()))
            .limit(limit)
            .load::<StatusHistory>(conn)
    }
}
