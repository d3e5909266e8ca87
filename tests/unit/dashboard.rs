use chrono::{Duration, TimeZone, Utc};
use research_tracker::db::enums::{DeadlineStatus, ProjectStatus};
use research_tracker::db::models::User;
use research_tracker::tracking::dashboard::{RECENT_CHANGES_LIMIT, summarize};
use research_tracker::tracking::{ProjectAggregate, ProjectDraft};
use uuid::Uuid;

fn researcher(username: &str) -> User {
    let joined = Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap();
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: None,
        password_hash: "hash".to_string(),
        first_name: None,
        last_name: None,
        department: Some("Physics".to_string()),
        institution: None,
        created_at: joined,
        updated_at: joined,
    }
}

#[test]
fn stats_over_a_small_portfolio() {
    let start = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();
    let today = start.date_naive();
    let alice = researcher("alice");
    let bob = researcher("bob");

    let mut lab = ProjectAggregate::create(
        ProjectDraft {
            title: "Lab".to_string(),
            owner_id: Some(alice.id),
            deadline: Some(today + Duration::days(2)),
            ..Default::default()
        },
        Some(alice.id),
        start,
    );
    let mut field = ProjectAggregate::create(
        ProjectDraft {
            title: "Field".to_string(),
            owner_id: Some(bob.id),
            deadline: Some(today - Duration::days(4)),
            ..Default::default()
        },
        Some(bob.id),
        start,
    );

    for hour in 1..=6 {
        let at = start + Duration::hours(hour);
        let next = if hour % 2 == 0 {
            ProjectStatus::InReview
        } else {
            ProjectStatus::InProgress
        };
        lab.set_status(next, Some(alice.id), at);
        field.set_status(next, Some(bob.id), at + Duration::minutes(30));
    }

    let mut history = lab.history().to_vec();
    history.extend_from_slice(field.history());
    assert_eq!(history.len(), 14);

    let projects = vec![lab.project().clone(), field.project().clone()];
    let stats = summarize(&projects, &[alice, bob], &history, today);

    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_projects, 2);
    assert_eq!(stats.active_projects, 0);
    assert_eq!(stats.pending_reviews, 0);

    assert_eq!(stats.recent_status_changes.len(), RECENT_CHANGES_LIMIT);
    let newest = &stats.recent_status_changes[0];
    assert_eq!(newest.project_title, "Field");
    assert_eq!(newest.changed_by.as_deref(), Some("bob"));
    assert!(
        stats
            .recent_status_changes
            .windows(2)
            .all(|w| w[0].changed_at >= w[1].changed_at)
    );

    let deadlines: Vec<_> = stats
        .upcoming_deadlines
        .iter()
        .map(|d| (d.project_title.as_str(), d.status, d.days_until_deadline))
        .collect();
    assert_eq!(
        deadlines,
        vec![
            ("Field", DeadlineStatus::Overdue, -4),
            ("Lab", DeadlineStatus::Approaching, 2),
        ]
    );
}

#[test]
fn stats_serialize_with_wire_names() {
    let today = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap().date_naive();
    let stats = summarize(&[], &[], &[], today);
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["total_projects"], 0);
    assert_eq!(json["pending_reviews"], 0);
    assert_eq!(json["status_breakdown"][0]["status"], "DRAFT");
    assert_eq!(json["recent_status_changes"], serde_json::json!([]));
}
