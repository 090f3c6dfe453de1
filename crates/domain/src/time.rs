//! Time and timestamp helpers.

use chrono::{DateTime, Duration, SubsecRound, Utc};

/// UTC timestamp used for validity periods and `created_at`/`updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to microseconds so it survives
/// a round-trip through storage unchanged.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// End of a validity period that starts at `start` and lasts `days` days.
#[must_use]
pub fn period_end(start: Timestamp, days: i32) -> Timestamp {
    start + Duration::days(i64::from(days))
}
