use chrono::{DateTime, Utc};
use rinds_config::Timestamp;

use super::DateTimeProvider;

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentDateTimeProvider;

impl DateTimeProvider for CurrentDateTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedDateTimeProvider(DateTime<Utc>);

impl FixedDateTimeProvider {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl From<Timestamp> for FixedDateTimeProvider {
    fn from(ts: Timestamp) -> Self {
        Self(ts.as_datetime())
    }
}

impl DateTimeProvider for FixedDateTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
