use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::clock::ClockConfig;
use crate::evaluator::EvaluatorConfig;
use crate::inventory::InventoryConfig;
use crate::logging::LoggingConfig;
use crate::validate;

// ---------------------------------------------------------------------------
// RindsConfig (resolved, validated)
// ---------------------------------------------------------------------------

/// Top-level `rinds.toml`. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RindsConfig {
    pub logging: LoggingConfig,
    pub evaluator: EvaluatorConfig,
    pub clock: ClockConfig,
    pub inventory: InventoryConfig,
}

impl RindsConfig {
    /// Read and parse a `rinds.toml` file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content.parse()
    }
}

impl FromStr for RindsConfig {
    type Err = anyhow::Error;

    /// Parse a TOML string into a validated [`RindsConfig`].
    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let config: RindsConfig = toml::from_str(toml_str)?;
        validate::validate(&config)?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
