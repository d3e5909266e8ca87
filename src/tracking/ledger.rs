//! Append-only status history of a single project.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::enums::ProjectStatus;
use crate::db::models::status_history::StatusHistory;

/// The ordered, write-once sequence of status changes of one project.
///
/// Entries can be appended and read, never edited or removed. The ledger
/// also remembers how many of its entries came from storage so a save only
/// inserts the new ones.
#[derive(Debug, Clone)]
pub struct StatusLedger {
    project_id: Uuid,
    entries: Vec<StatusHistory>,
    persisted: usize,
}

impl StatusLedger {
    pub fn new(project_id: Uuid) -> Self {
        Self {
            project_id,
            entries: Vec::new(),
            persisted: 0,
        }
    }

    /// Rebuilds a ledger from stored rows. Rows belonging to another project
    /// are dropped.
    pub fn from_persisted(project_id: Uuid, mut entries: Vec<StatusHistory>) -> Self {
        entries.retain(|entry| entry.project_id == project_id);
        entries.sort_by_key(|entry| entry.seq);
        let persisted = entries.len();
        Self {
            project_id,
            entries,
            persisted,
        }
    }

    /// Records a transition. `previous` is `None` only for the entry written
    /// at project creation.
    ///
    /// `changed_at` is `now` clamped to the previous entry's timestamp, so
    /// timestamps never decrease along the ledger.
    pub fn append(
        &mut self,
        previous: Option<ProjectStatus>,
        new_status: ProjectStatus,
        changed_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> &StatusHistory {
        debug_assert!(previous != Some(new_status), "no-op transition recorded");

        let changed_at = match self.entries.last() {
            Some(last) if last.changed_at > now => last.changed_at,
            _ => now,
        };
        let seq = i32::try_from(self.entries.len()).unwrap_or(i32::MAX);

        self.entries.push(StatusHistory {
            id: Uuid::new_v4(),
            project_id: self.project_id,
            seq,
            old_status: previous,
            new_status,
            changed_at,
            changed_by_id: changed_by,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    pub fn entries(&self) -> &[StatusHistory] {
        &self.entries
    }

    pub fn last(&self) -> Option<&StatusHistory> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries appended since the ledger was loaded or last persisted.
    pub fn pending(&self) -> &[StatusHistory] {
        &self.entries[self.persisted..]
    }

    pub fn mark_persisted(&mut self) {
        self.persisted = self.entries.len();
    }

    pub fn into_entries(self) -> Vec<StatusHistory> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn append_links_and_numbers_entries() {
        let project_id = Uuid::new_v4();
        let user = Uuid::new_v4();
        let now = Utc::now();
        let mut ledger = StatusLedger::new(project_id);

        ledger.append(None, ProjectStatus::Draft, Some(user), now);
        let second = ledger.append(
            Some(ProjectStatus::Draft),
            ProjectStatus::InReview,
            None,
            now + Duration::seconds(5),
        );
        assert_eq!(second.seq, 1);
        assert_eq!(second.project_id, project_id);
        assert_eq!(second.old_status, Some(ProjectStatus::Draft));
        assert_eq!(second.changed_by_id, None);

        let first = &ledger.entries()[0];
        assert_eq!(first.old_status, None);
        assert_eq!(first.changed_by_id, Some(user));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let mut ledger = StatusLedger::new(Uuid::new_v4());
        let now = Utc::now();
        ledger.append(None, ProjectStatus::Draft, None, now);
        let skewed = ledger.append(
            Some(ProjectStatus::Draft),
            ProjectStatus::Approved,
            None,
            now - Duration::minutes(10),
        );
        assert_eq!(skewed.changed_at, now);
    }

    #[test]
    fn pending_tracks_unsaved_entries() {
        let project_id = Uuid::new_v4();
        let now = Utc::now();
        let mut ledger = StatusLedger::new(project_id);
        ledger.append(None, ProjectStatus::Draft, None, now);
        assert_eq!(ledger.pending().len(), 1);

        ledger.mark_persisted();
        assert!(ledger.pending().is_empty());

        ledger.append(Some(ProjectStatus::Draft), ProjectStatus::OnHold, None, now);
        assert_eq!(ledger.pending().len(), 1);
        assert_eq!(ledger.pending()[0].new_status, ProjectStatus::OnHold);
    }

    #[test]
    fn from_persisted_orders_by_seq_and_filters_foreign_rows() {
        let project_id = Uuid::new_v4();
        let now = Utc::now();
        let mut source = StatusLedger::new(project_id);
        source.append(None, ProjectStatus::Draft, None, now);
        source.append(Some(ProjectStatus::Draft), ProjectStatus::InProgress, None, now);
        let mut rows = source.into_entries();
        rows.reverse();

        let mut foreign = StatusLedger::new(Uuid::new_v4());
        foreign.append(None, ProjectStatus::Draft, None, now);
        rows.extend(foreign.into_entries());

        let ledger = StatusLedger::from_persisted(project_id, rows);
        assert_eq!(ledger.len(), 2);
        assert!(ledger.pending().is_empty());
        assert_eq!(ledger.entries()[0].seq, 0);
        assert_eq!(ledger.last().unwrap().new_status, ProjectStatus::InProgress);
    }
}
