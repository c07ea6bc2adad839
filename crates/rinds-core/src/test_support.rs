//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use rinds_config::{PluginEntry, Timestamp};

use crate::error::CoreResult;
use crate::provider::{FixedDateTimeProvider, PluginsProvider, StaticPluginsProvider};
use crate::registry::ProcessorRegistry;

pub type PluginSpec<'a> = (&'a str, Option<&'a str>, bool);

pub fn ts(secs: i64) -> Timestamp {
    Timestamp::from_unix(secs).expect("timestamp in range")
}

pub fn clock_at(secs: i64) -> Arc<FixedDateTimeProvider> {
    Arc::new(FixedDateTimeProvider::from(ts(secs)))
}

pub fn inventory(plugins: &[PluginSpec<'_>]) -> StaticPluginsProvider {
    StaticPluginsProvider::new(
        plugins
            .iter()
            .map(|(slug, version, active)| PluginEntry::new(*slug, *version, *active)),
    )
}

/// Registry with a clock fixed at `now_secs` and an in-memory inventory.
pub fn registry_at(now_secs: i64, plugins: &[PluginSpec<'_>]) -> ProcessorRegistry {
    ProcessorRegistry::new(clock_at(now_secs), Arc::new(inventory(plugins)))
}

// ---------------------------------------------------------------------------
// RecordingPlugins: remembers which slugs were looked up
// ---------------------------------------------------------------------------

pub struct RecordingPlugins {
    inner: StaticPluginsProvider,
    queried: Mutex<Vec<String>>,
}

impl RecordingPlugins {
    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().expect("recorder lock").clone()
    }
}

impl PluginsProvider for RecordingPlugins {
    fn plugin(&self, slug: &str) -> CoreResult<Option<PluginEntry>> {
        self.queried.lock().expect("recorder lock").push(slug.to_string());
        self.inner.plugin(slug)
    }
}

pub fn recording_registry(
    now_secs: i64,
    plugins: &[PluginSpec<'_>],
) -> (ProcessorRegistry, Arc<RecordingPlugins>) {
    let recorder = Arc::new(RecordingPlugins {
        inner: inventory(plugins),
        queried: Mutex::new(Vec::new()),
    });
    let reg = ProcessorRegistry::new(clock_at(now_secs), recorder.clone());
    (reg, recorder)
}

// ---------------------------------------------------------------------------
// BrokenPlugins: every lookup fails
// ---------------------------------------------------------------------------

pub struct BrokenPlugins;

impl PluginsProvider for BrokenPlugins {
    fn plugin(&self, _slug: &str) -> CoreResult<Option<PluginEntry>> {
        use orion_error::prelude::*;

        StructError::from(crate::error::CoreReason::Provider)
            .with_detail("inventory unavailable")
            .err()
    }
}
