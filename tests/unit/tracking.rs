use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use research_tracker::db::enums::{DeadlineStatus, ProjectStatus};
use research_tracker::tracking::deadline::{APPROACHING_WINDOW_DAYS, classify, days_until};
use research_tracker::tracking::{ProjectAggregate, ProjectDraft};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 8, 30, 0).unwrap()
}

fn new_project() -> ProjectAggregate {
    ProjectAggregate::create(
        ProjectDraft {
            title: "Property project".to_string(),
            ..Default::default()
        },
        None,
        base_time(),
    )
}

fn any_status() -> impl Strategy<Value = ProjectStatus> {
    prop::sample::select(ProjectStatus::ALL.to_vec())
}

proptest! {
    #[test]
    fn classify_partitions_by_day_offset(offset in -400i64..400) {
        let today = base_date();
        let deadline = today + Duration::days(offset);
        let expected = if offset < 0 {
            DeadlineStatus::Overdue
        } else if offset <= APPROACHING_WINDOW_DAYS {
            DeadlineStatus::Approaching
        } else {
            DeadlineStatus::OnTrack
        };
        prop_assert_eq!(classify(Some(deadline), today), expected);
        prop_assert_eq!(days_until(deadline, today), offset);
    }

    #[test]
    fn repeating_current_status_never_grows_history(target in any_status()) {
        let mut project = new_project();
        project.set_status(target, None, base_time());
        let before = project.history().len();

        prop_assert!(!project.set_status(target, None, base_time() + Duration::hours(1)));
        prop_assert_eq!(project.history().len(), before);
    }

    #[test]
    fn history_counts_only_real_transitions(
        steps in prop::collection::vec((any_status(), -120i64..120), 0..40)
    ) {
        let mut project = new_project();
        let mut expected = 1;
        for (status, skew_minutes) in steps {
            let previous = project.status();
            project.set_status(status, None, base_time() + Duration::minutes(skew_minutes));
            if previous != status {
                expected += 1;
            }
        }

        let history = project.history();
        prop_assert_eq!(history.len(), expected);
        prop_assert!(history.windows(2).all(|w| w[0].changed_at <= w[1].changed_at));
        prop_assert!(history.windows(2).all(|w| w[0].new_status == w[1].old_status.unwrap()));
        prop_assert_eq!(history.last().unwrap().new_status, project.status());
    }
}

#[test]
fn draft_in_progress_in_progress_yields_two_entries() {
    let mut project = new_project();
    project.set_status(ProjectStatus::InProgress, None, base_time());
    project.set_status(ProjectStatus::InProgress, None, base_time());
    assert_eq!(project.history().len(), 2);
}

#[test]
fn deadline_scenarios() {
    let today = base_date();

    let soon = today + Duration::days(3);
    assert_eq!(classify(Some(soon), today), DeadlineStatus::Approaching);
    assert_eq!(days_until(soon, today), 3);

    let yesterday = today - Duration::days(1);
    assert_eq!(classify(Some(yesterday), today), DeadlineStatus::Overdue);
    assert_eq!(days_until(yesterday, today), -1);

    assert_eq!(classify(None, today), DeadlineStatus::NoDeadline);
}
