use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// `[logging]` section. Omitted entirely, the CLI logs warnings and errors
/// to stderr in plain text.
///
/// ```toml
/// [logging]
/// level = "info"
/// format = "json"
/// file = "logs/rinds.log"
/// modules = { "rinds_core::evaluator" = "trace" }
/// ```
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base filter directive applied to every target.
    pub level: String,
    /// Per-target overrides appended after `level`.
    pub modules: BTreeMap<String, String>,
    /// Extra log file, written alongside stderr.
    pub file: Option<PathBuf>,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            modules: BTreeMap::new(),
            file: None,
            format: LogFormat::Plain,
        }
    }
}

impl LoggingConfig {
    /// `EnvFilter` directives: `level` first, then one `target=level` per
    /// module override in target order.
    pub fn filter_directives(&self) -> String {
        let mut directives = vec![self.level.clone()];
        for (target, level) in &self.modules {
            directives.push(format!("{target}={level}"));
        }
        directives.join(",")
    }

    /// Log file path, resolved against `base_dir` when relative.
    pub fn file_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.file.as_ref().map(|file| {
            if file.is_relative() {
                base_dir.join(file)
            } else {
                file.clone()
            }
        })
    }
}

/// `plain` lines with a `[domain]` prefix, or one JSON object per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Plain,
    Json,
}
