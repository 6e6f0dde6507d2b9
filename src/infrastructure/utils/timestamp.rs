use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to the store's millisecond resolution, so a record
/// echoed back after insert compares equal to the one read later.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
