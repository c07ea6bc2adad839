use std::path::Path;

use anyhow::Result;

use rinds_config::{RindsConfig, Timestamp};
use rinds_core::{ProcessorRegistry, load_rules};

/// Evaluate every rule in `rule_file`; prints `true` or `false`.
pub fn run(
    mut config: RindsConfig,
    base_dir: &Path,
    rule_file: &Path,
    now: Option<&str>,
) -> Result<bool> {
    if let Some(now) = now {
        let ts: Timestamp = now
            .parse()
            .map_err(|e| anyhow::anyhow!("--now {now:?}: {e}"))?;
        config.clock.now = Some(ts);
    }

    let rules = load_rules(rule_file).map_err(|e| anyhow::anyhow!("{e}"))?;
    let registry = ProcessorRegistry::from_config(&config, base_dir);
    let satisfied = registry.evaluate_all(&rules);

    tracing::info!(
        domain = "rule",
        file = %rule_file.display(),
        rules = rules.len(),
        satisfied,
        "evaluated rule file"
    );
    println!("{satisfied}");
    Ok(satisfied)
}
