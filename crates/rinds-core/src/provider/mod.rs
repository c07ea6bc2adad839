//! Ambient facts consumed by leaf processors.
//!
//! Providers are stateless query facades: every call reads the current state
//! of whatever they front (the clock, a plugin inventory).  They are held
//! behind `Arc` so one registry can hand the same provider to many
//! processors, across threads if needed.

mod clock;
mod plugins;

use chrono::{DateTime, Utc};
use rinds_config::PluginEntry;

use crate::error::CoreResult;

pub use clock::{CurrentDateTimeProvider, FixedDateTimeProvider};
pub use plugins::{InventoryFilePluginsProvider, StaticPluginsProvider};

/// Source of "now" for time-window rules.
pub trait DateTimeProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Plugin activation and version state.
pub trait PluginsProvider: Send + Sync {
    /// Look up one installed plugin. `Ok(None)` when it is not installed.
    fn plugin(&self, slug: &str) -> CoreResult<Option<PluginEntry>>;

    fn is_active(&self, slug: &str) -> CoreResult<bool> {
        Ok(self.plugin(slug)?.is_some_and(|p| p.active))
    }
}
