use std::sync::Arc;

use crate::evaluator::EvalContext;
use crate::provider::PluginsProvider;
use crate::rule::RuleDescriptor;
use crate::rule::version::VersionOperator;

use super::RuleProcessor;

/// Holds when `plugin` is active and its installed version satisfies
/// `<installed> <operator> <version>`.
pub struct PluginVersionRuleProcessor {
    plugins: Arc<dyn PluginsProvider>,
}

struct VersionRule<'a> {
    plugin: &'a str,
    operator: VersionOperator,
    version: &'a str,
}

impl PluginVersionRuleProcessor {
    pub fn new(plugins: Arc<dyn PluginsProvider>) -> Self {
        Self { plugins }
    }

    fn installed_version(&self, slug: &str) -> Option<String> {
        let lookup = self.plugins.plugin(slug);
        match lookup {
            Ok(Some(entry)) if entry.active => entry.version,
            Ok(_) => None,
            Err(e) => {
                rd_warn!(prov, plugin = slug, error = %e, "plugin lookup failed; treating as not installed");
                None
            }
        }
    }
}

fn parse_rule(rule: &RuleDescriptor) -> Result<VersionRule<'_>, String> {
    let plugin = rule
        .str_param("plugin")
        .ok_or_else(|| "`plugin` must be a plugin slug".to_string())?;
    let version = rule
        .str_param("version")
        .ok_or_else(|| "`version` must be a version string".to_string())?;
    let operator = match rule.str_param("operator") {
        Some(op) => VersionOperator::parse(op)
            .ok_or_else(|| format!("unsupported version operator {op:?}"))?,
        None => return Err("`operator` must be a comparison operator".to_string()),
    };
    Ok(VersionRule {
        plugin,
        operator,
        version,
    })
}

impl RuleProcessor for PluginVersionRuleProcessor {
    fn evaluate(&self, rule: &RuleDescriptor, _ctx: &EvalContext) -> bool {
        let Ok(parsed) = parse_rule(rule) else {
            return false;
        };
        let Some(installed) = self.installed_version(parsed.plugin) else {
            return false;
        };
        let holds = parsed.operator.holds(&installed, parsed.version);
        rd_trace!(
            rule,
            plugin = parsed.plugin,
            installed = installed.as_str(),
            operator = %parsed.operator,
            version = parsed.version,
            holds,
            "compared plugin version"
        );
        holds
    }

    fn validate(&self, rule: &RuleDescriptor) -> Result<(), String> {
        parse_rule(rule).map(|_| ())
    }
}
