use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

/// Lifecycle status of a research project.
///
/// Any status may move to any other; the declaration order is only used for
/// display ordering.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Draft,
    InReview,
    Approved,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 7] = [
        ProjectStatus::Draft,
        ProjectStatus::InReview,
        ProjectStatus::Approved,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
        ProjectStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "DRAFT",
            ProjectStatus::InReview => "IN_REVIEW",
            ProjectStatus::Approved => "APPROVED",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::OnHold => "ON_HOLD",
            ProjectStatus::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(ProjectStatus::Draft),
            "IN_REVIEW" => Ok(ProjectStatus::InReview),
            "APPROVED" => Ok(ProjectStatus::Approved),
            "IN_PROGRESS" => Ok(ProjectStatus::InProgress),
            "COMPLETED" => Ok(ProjectStatus::Completed),
            "ON_HOLD" => Ok(ProjectStatus::OnHold),
            "CANCELLED" => Ok(ProjectStatus::Cancelled),
            other => Err(format!("Unrecognized project status: {}", other)),
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromSql<Text, Pg> for ProjectStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        s.parse::<ProjectStatus>().map_err(Into::into)
    }
}

impl ToSql<Text, Pg> for ProjectStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

/// Urgency bucket derived from a project's deadline and the current date.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeadlineStatus {
    NoDeadline,
    OnTrack,
    Approaching,
    Overdue,
}

impl DeadlineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineStatus::NoDeadline => "NO_DEADLINE",
            DeadlineStatus::OnTrack => "ON_TRACK",
            DeadlineStatus::Approaching => "APPROACHING",
            DeadlineStatus::Overdue => "OVERDUE",
        }
    }

    /// Buckets surfaced on the dashboard as needing attention.
    pub fn needs_attention(&self) -> bool {
        matches!(self, DeadlineStatus::Approaching | DeadlineStatus::Overdue)
    }
}

impl FromStr for DeadlineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NO_DEADLINE" => Ok(DeadlineStatus::NoDeadline),
            "ON_TRACK" => Ok(DeadlineStatus::OnTrack),
            "APPROACHING" => Ok(DeadlineStatus::Approaching),
            "OVERDUE" => Ok(DeadlineStatus::Overdue),
            other => Err(format!("Unrecognized deadline status: {}", other)),
        }
    }
}

impl std::fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromSql<Text, Pg> for DeadlineStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        s.parse::<DeadlineStatus>().map_err(Into::into)
    }
}

impl ToSql<Text, Pg> for DeadlineStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}
