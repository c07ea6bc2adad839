use std::collections::HashMap;
use std::path::PathBuf;

use orion_error::prelude::*;
use rinds_config::PluginEntry;

use crate::error::{CoreReason, CoreResult};

use super::PluginsProvider;

// ---------------------------------------------------------------------------
// StaticPluginsProvider
// ---------------------------------------------------------------------------

/// In-memory inventory, e.g. from `[[inventory.plugins]]`.
#[derive(Debug, Clone, Default)]
pub struct StaticPluginsProvider {
    plugins: HashMap<String, PluginEntry>,
}

impl StaticPluginsProvider {
    /// Later entries win when a slug repeats.
    pub fn new(entries: impl IntoIterator<Item = PluginEntry>) -> Self {
        let plugins = entries
            .into_iter()
            .map(|entry| (entry.slug.clone(), entry))
            .collect();
        Self { plugins }
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl PluginsProvider for StaticPluginsProvider {
    fn plugin(&self, slug: &str) -> CoreResult<Option<PluginEntry>> {
        Ok(self.plugins.get(slug).cloned())
    }
}

// ---------------------------------------------------------------------------
// InventoryFilePluginsProvider
// ---------------------------------------------------------------------------

/// Fronts a JSON inventory file (an array of [`PluginEntry`]).
///
/// The file is re-read on every lookup so evaluations always see the current
/// plugin state; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct InventoryFilePluginsProvider {
    path: PathBuf,
}

impl InventoryFilePluginsProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_inventory(&self) -> CoreResult<Vec<PluginEntry>> {
        let content = std::fs::read_to_string(&self.path)
            .owe(CoreReason::Provider)
            .position(self.path.display().to_string())?;
        serde_json::from_str(&content)
            .owe(CoreReason::Provider)
            .position(self.path.display().to_string())
    }
}

impl PluginsProvider for InventoryFilePluginsProvider {
    fn plugin(&self, slug: &str) -> CoreResult<Option<PluginEntry>> {
        let found = self
            .read_inventory()?
            .into_iter()
            .rev()
            .find(|entry| entry.slug == slug);
        Ok(found)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
