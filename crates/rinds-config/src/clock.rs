use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// `[clock]` section. Without `now` the system clock is used.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Pin "now" to a fixed instant, e.g. `"2024-01-01T00:00:00Z"`.
    pub now: Option<Timestamp>,
}
