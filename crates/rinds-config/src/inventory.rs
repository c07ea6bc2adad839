use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InventoryConfig: deserialized from [inventory]
// ---------------------------------------------------------------------------

/// Where plugin activation/version facts come from.
///
/// Either `file` (a JSON array of [`PluginEntry`] re-read on every query) or
/// inline `[[inventory.plugins]]` entries, never both.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// JSON inventory file. Relative paths are resolved against the config
    /// file's parent directory.
    pub file: Option<PathBuf>,
    pub plugins: Vec<PluginEntry>,
}

// ---------------------------------------------------------------------------
// PluginEntry: one installed plugin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PluginEntry {
    pub slug: String,
    /// Installed version, if known.
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl PluginEntry {
    pub fn new(slug: impl Into<String>, version: Option<&str>, active: bool) -> Self {
        Self {
            slug: slug.into(),
            version: version.map(str::to_string),
            active,
        }
    }
}
