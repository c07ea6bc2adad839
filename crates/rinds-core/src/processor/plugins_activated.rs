use std::sync::Arc;

use crate::evaluator::EvalContext;
use crate::provider::PluginsProvider;
use crate::rule::RuleDescriptor;

use super::RuleProcessor;

/// Holds when every slug in `plugins` is active. An empty list holds.
pub struct PluginsActivatedRuleProcessor {
    plugins: Arc<dyn PluginsProvider>,
}

impl PluginsActivatedRuleProcessor {
    pub fn new(plugins: Arc<dyn PluginsProvider>) -> Self {
        Self { plugins }
    }
}

impl RuleProcessor for PluginsActivatedRuleProcessor {
    fn evaluate(&self, rule: &RuleDescriptor, _ctx: &EvalContext) -> bool {
        let Some(slugs) = rule.str_list_param("plugins") else {
            return false;
        };

        for slug in slugs {
            match self.plugins.is_active(slug) {
                Ok(true) => {}
                Ok(false) => return false,
                Err(e) => {
                    rd_warn!(prov, plugin = slug, error = %e, "plugin lookup failed; treating as inactive");
                    return false;
                }
            }
        }
        true
    }

    fn validate(&self, rule: &RuleDescriptor) -> Result<(), String> {
        match rule.str_list_param("plugins") {
            Some(_) => Ok(()),
            None => Err("`plugins` must be an array of plugin slugs".to_string()),
        }
    }
}
