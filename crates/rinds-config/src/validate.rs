use std::collections::HashSet;

use crate::rinds::RindsConfig;

/// Internal validation, called automatically during `RindsConfig::from_str` / `load`.
pub(crate) fn validate(config: &RindsConfig) -> anyhow::Result<()> {
    if config.evaluator.max_depth == 0 {
        anyhow::bail!("evaluator.max_depth must be > 0");
    }

    let inventory = &config.inventory;
    if inventory.file.is_some() && !inventory.plugins.is_empty() {
        anyhow::bail!("inventory.file and inventory.plugins are mutually exclusive");
    }

    let mut seen = HashSet::new();
    for (i, plugin) in inventory.plugins.iter().enumerate() {
        if plugin.slug.trim().is_empty() {
            anyhow::bail!("inventory.plugins[{i}]: slug must not be empty");
        }
        if !seen.insert(plugin.slug.as_str()) {
            anyhow::bail!("inventory.plugins[{i}]: duplicate slug {:?}", plugin.slug);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
