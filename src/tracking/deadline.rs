//! Deadline bucket classification.
//!
//! Everything here is pure: the caller supplies `today`, nothing reads a
//! clock.

use chrono::NaiveDate;

use crate::db::enums::DeadlineStatus;

/// A deadline this many days away or fewer (and not yet past) is approaching.
pub const APPROACHING_WINDOW_DAYS: i64 = 7;

/// Signed number of days from `today` until `deadline`. Negative once the
/// deadline has passed.
pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    deadline.signed_duration_since(today).num_days()
}

pub fn classify(deadline: Option<NaiveDate>, today: NaiveDate) -> DeadlineStatus {
    let Some(deadline) = deadline else {
        return DeadlineStatus::NoDeadline;
    };

    match days_until(deadline, today) {
        days if days < 0 => DeadlineStatus::Overdue,
        days if days <= APPROACHING_WINDOW_DAYS => DeadlineStatus::Approaching,
        _ => DeadlineStatus::OnTrack,
    }
}
