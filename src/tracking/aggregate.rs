//! Project aggregate: the only way status and deadline fields change.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::db::enums::ProjectStatus;
use crate::db::models::project::Project;
use crate::db::models::status_history::StatusHistory;
use crate::tracking::deadline;
use crate::tracking::ledger::StatusLedger;

/// Status every new project starts in.
pub const INITIAL_STATUS: ProjectStatus = ProjectStatus::Draft;

/// Input for creating a project.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub owner_id: Option<Uuid>,
}

/// Changes to the descriptive fields of a project. `None` leaves a field as
/// it is; `Some(None)` clears a nullable one.
#[derive(Debug, Clone, Default)]
pub struct DetailChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub reminder_sent: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct ProjectAggregate {
    project: Project,
    ledger: StatusLedger,
    /// Status of the stored row this aggregate was built from. `None` until
    /// the project has been stored once.
    stored_status: Option<ProjectStatus>,
}

impl ProjectAggregate {
    /// A new project in the initial status, with the creation entry already
    /// in its ledger.
    pub fn create(draft: ProjectDraft, created_by: Option<Uuid>, now: DateTime<Utc>) -> Self {
        let id = Uuid::new_v4();
        let project = Project {
            id,
            title: draft.title,
            description: draft.description,
            status: INITIAL_STATUS,
            start_date: draft.start_date,
            end_date: draft.end_date,
            deadline: draft.deadline,
            deadline_status: deadline::classify(draft.deadline, now.date_naive()),
            reminder_sent: false,
            owner_id: draft.owner_id,
            created_at: now,
            updated_at: now,
        };

        let mut ledger = StatusLedger::new(id);
        ledger.append(None, INITIAL_STATUS, created_by, now);

        Self {
            project,
            ledger,
            stored_status: None,
        }
    }

    /// Wraps a stored project and its stored history.
    pub fn from_parts(project: Project, history: Vec<StatusHistory>) -> Self {
        let ledger = StatusLedger::from_persisted(project.id, history);
        let stored_status = Some(project.status);
        Self {
            project,
            ledger,
            stored_status,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn id(&self) -> Uuid {
        self.project.id
    }

    pub fn status(&self) -> ProjectStatus {
        self.project.status
    }

    pub fn ledger(&self) -> &StatusLedger {
        &self.ledger
    }

    pub fn history(&self) -> &[StatusHistory] {
        self.ledger.entries()
    }

    /// The status the stored row must still have for a save to succeed.
    pub fn stored_status(&self) -> Option<ProjectStatus> {
        self.stored_status
    }

    /// Moves the project to `new_status`, recording the transition first.
    /// Re-assigning the current status does nothing and returns `false`.
    pub fn set_status(
        &mut self,
        new_status: ProjectStatus,
        changed_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> bool {
        let previous = self.project.status;
        if previous == new_status {
            return false;
        }

        self.ledger
            .append(Some(previous), new_status, changed_by, now);
        self.project.status = new_status;
        self.project.updated_at = now;
        true
    }

    pub fn set_deadline(&mut self, deadline: Option<NaiveDate>, today: NaiveDate) {
        self.project.deadline = deadline;
        self.refresh_deadline_status(today);
    }

    pub fn refresh_deadline_status(&mut self, today: NaiveDate) {
        self.project.deadline_status = deadline::classify(self.project.deadline, today);
    }

    pub fn apply_details(&mut self, changes: DetailChanges) {
        if let Some(title) = changes.title {
            self.project.title = title;
        }
        if let Some(description) = changes.description {
            self.project.description = description;
        }
        if let Some(start_date) = changes.start_date {
            self.project.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            self.project.end_date = end_date;
        }
        if let Some(reminder_sent) = changes.reminder_sent {
            self.project.reminder_sent = reminder_sent;
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.project.updated_at = now;
    }

    /// History entries not yet written to storage.
    pub fn pending_history(&self) -> &[StatusHistory] {
        self.ledger.pending()
    }

    /// Called once the project row and pending history have been stored.
    pub fn mark_persisted(&mut self, stored: Project) {
        self.stored_status = Some(stored.status);
        self.project = stored;
        self.ledger.mark_persisted();
    }

    pub fn into_parts(self) -> (Project, Vec<StatusHistory>) {
        (self.project, self.ledger.into_entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::DeadlineStatus;
    use chrono::{Duration, TimeZone};

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn draft(title: &str) -> ProjectDraft {
        ProjectDraft {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn creation_seeds_ledger() {
        let owner = Uuid::new_v4();
        let project = ProjectAggregate::create(
            ProjectDraft {
                owner_id: Some(owner),
                ..draft("Genome survey")
            },
            Some(owner),
            noon(2024, 1, 1),
        );

        assert_eq!(project.status(), ProjectStatus::Draft);
        assert_eq!(project.history().len(), 1);
        let entry = &project.history()[0];
        assert_eq!(entry.old_status, None);
        assert_eq!(entry.new_status, ProjectStatus::Draft);
        assert_eq!(entry.changed_by_id, Some(owner));
        assert_eq!(entry.project_id, project.id());
        assert_eq!(project.project().deadline_status, DeadlineStatus::NoDeadline);
    }

    #[test]
    fn draft_to_in_progress_then_repeat() {
        let now = noon(2024, 1, 1);
        let mut project = ProjectAggregate::create(draft("Climate"), None, now);

        assert!(project.set_status(ProjectStatus::InProgress, None, now + Duration::hours(1)));
        assert!(!project.set_status(ProjectStatus::InProgress, None, now + Duration::hours(2)));

        let transitions: Vec<_> = project
            .history()
            .iter()
            .map(|entry| (entry.old_status, entry.new_status))
            .collect();
        assert_eq!(
            transitions,
            vec![
                (None, ProjectStatus::Draft),
                (Some(ProjectStatus::Draft), ProjectStatus::InProgress),
            ]
        );
        assert_eq!(project.status(), ProjectStatus::InProgress);
    }

    #[test]
    fn any_status_can_follow_any_other() {
        let now = noon(2024, 1, 1);
        let mut project = ProjectAggregate::create(draft("Loop"), None, now);
        assert!(project.set_status(ProjectStatus::Cancelled, None, now));
        assert!(project.set_status(ProjectStatus::Draft, None, now));
        assert!(project.set_status(ProjectStatus::Completed, None, now));
        assert_eq!(project.history().len(), 4);
    }

    #[test]
    fn deadline_bucket_follows_deadline() {
        let now = noon(2024, 1, 1);
        let today = now.date_naive();
        let mut project = ProjectAggregate::create(draft("Deadline"), None, now);

        project.set_deadline(Some(today + Duration::days(3)), today);
        assert_eq!(project.project().deadline_status, DeadlineStatus::Approaching);

        project.set_deadline(Some(today - Duration::days(1)), today);
        assert_eq!(project.project().deadline_status, DeadlineStatus::Overdue);

        project.set_deadline(Some(today + Duration::days(30)), today);
        assert_eq!(project.project().deadline_status, DeadlineStatus::OnTrack);

        project.set_deadline(None, today);
        assert_eq!(project.project().deadline_status, DeadlineStatus::NoDeadline);
    }

    #[test]
    fn refresh_reclassifies_against_new_date() {
        let now = noon(2024, 1, 1);
        let today = now.date_naive();
        let mut project = ProjectAggregate::create(
            ProjectDraft {
                deadline: Some(today + Duration::days(10)),
                ..draft("Aging")
            },
            None,
            now,
        );
        assert_eq!(project.project().deadline_status, DeadlineStatus::OnTrack);

        project.refresh_deadline_status(today + Duration::days(5));
        assert_eq!(project.project().deadline_status, DeadlineStatus::Approaching);

        project.refresh_deadline_status(today + Duration::days(11));
        assert_eq!(project.project().deadline_status, DeadlineStatus::Overdue);
    }

    #[test]
    fn persisting_clears_pending_history() {
        let now = noon(2024, 1, 1);
        let mut project = ProjectAggregate::create(draft("Persist"), None, now);
        assert_eq!(project.pending_history().len(), 1);

        let stored = project.project().clone();
        project.mark_persisted(stored);
        assert!(project.pending_history().is_empty());

        project.set_status(ProjectStatus::InReview, None, now);
        assert_eq!(project.pending_history().len(), 1);
        assert_eq!(project.history().len(), 2);
    }

    #[test]
    fn stored_status_survives_in_memory_transitions() {
        let now = noon(2024, 1, 1);
        let mut project = ProjectAggregate::create(draft("Snapshot"), None, now);
        assert_eq!(project.stored_status(), None);

        let stored = project.project().clone();
        project.mark_persisted(stored);
        assert_eq!(project.stored_status(), Some(ProjectStatus::Draft));

        project.set_status(ProjectStatus::Approved, None, now);
        assert_eq!(project.stored_status(), Some(ProjectStatus::Draft));

        let reloaded = ProjectAggregate::from_parts(
            project.project().clone(),
            project.history().to_vec(),
        );
        assert_eq!(reloaded.stored_status(), Some(ProjectStatus::Approved));
    }

    #[test]
    fn details_apply_without_touching_status() {
        let now = noon(2024, 1, 1);
        let mut project = ProjectAggregate::create(
            ProjectDraft {
                description: Some("old".into()),
                ..draft("Before")
            },
            None,
            now,
        );
        project.apply_details(DetailChanges {
            title: Some("After".into()),
            description: Some(None),
            reminder_sent: Some(true),
            ..Default::default()
        });

        assert_eq!(project.project().title, "After");
        assert_eq!(project.project().description, None);
        assert!(project.project().reminder_sent);
        assert_eq!(project.history().len(), 1);
    }
}
