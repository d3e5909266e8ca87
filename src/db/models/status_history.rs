use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::enums::ProjectStatus;

/// One immutable entry of a project's status ledger.
///
/// `old_status` is `None` only for the entry written when the project was
/// created. Rows are inserted once and never updated.
#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::status_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StatusHistory {
    pub id: Uuid,
    pub project_id: Uuid,
    pub seq: i32,
    pub old_status: Option<ProjectStatus>,
    pub new_status: ProjectStatus,
    pub changed_at: DateTime<Utc>,
    pub changed_by_id: Option<Uuid>,
}
