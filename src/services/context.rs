use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Who is acting and when. Every mutation in a request uses the same clock
/// reading.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub now: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            now: Utc::now(),
        }
    }

    /// The calendar date deadlines are classified against (UTC).
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}
