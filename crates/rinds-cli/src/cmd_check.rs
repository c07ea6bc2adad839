use std::path::Path;

use anyhow::Result;

use rinds_config::RindsConfig;
use rinds_core::{LintIssue, ProcessorRegistry, Severity, lint_rule, load_rules};

/// Lint every rule in `rule_file`; returns `false` when any error-level
/// issue is found.
pub fn run(
    mut config: RindsConfig,
    base_dir: &Path,
    rule_file: &Path,
    max_depth: Option<usize>,
) -> Result<bool> {
    if let Some(max_depth) = max_depth {
        if max_depth == 0 {
            anyhow::bail!("--max-depth must be > 0");
        }
        config.evaluator.max_depth = max_depth;
    }

    let rules = load_rules(rule_file).map_err(|e| anyhow::anyhow!("{e}"))?;
    let registry = ProcessorRegistry::from_config(&config, base_dir);

    let mut issues = Vec::new();
    for (i, rule) in rules.iter().enumerate() {
        for issue in lint_rule(&registry, rule) {
            issues.push((i, issue));
        }
    }

    for (i, issue) in &issues {
        eprintln!("rule #{i}: {issue}");
    }
    let summary = summarize(issues.iter().map(|(_, issue)| issue));
    eprintln!("{}", summary.line());
    Ok(summary.errors == 0)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    errors: usize,
    warnings: usize,
}

impl Summary {
    fn line(&self) -> String {
        if self.errors + self.warnings == 0 {
            "No issues found.".to_string()
        } else {
            format!("\n{} error(s), {} warning(s)", self.errors, self.warnings)
        }
    }
}

fn summarize<'a>(issues: impl Iterator<Item = &'a LintIssue>) -> Summary {
    let mut summary = Summary::default();
    for issue in issues {
        match issue.severity {
            Severity::Error => summary.errors += 1,
            Severity::Warning => summary.warnings += 1,
        }
    }
    summary
}
