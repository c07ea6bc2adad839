use crate::evaluator::{EvalContext, RuleEvaluator};
use crate::rule::RuleDescriptor;

use super::RuleProcessor;

/// Holds when any nested rule holds, evaluated in order and stopping at the
/// first that does. An empty list never holds.
pub struct OrRuleProcessor<'r> {
    evaluator: RuleEvaluator<'r>,
}

impl<'r> OrRuleProcessor<'r> {
    pub fn new(evaluator: RuleEvaluator<'r>) -> Self {
        Self { evaluator }
    }
}

impl RuleProcessor for OrRuleProcessor<'_> {
    fn evaluate(&self, rule: &RuleDescriptor, ctx: &EvalContext) -> bool {
        rule.rules
            .iter()
            .flatten()
            .any(|inner| self.evaluator.evaluate(inner, ctx))
    }

    fn validate(&self, rule: &RuleDescriptor) -> Result<(), String> {
        match rule.rules {
            Some(_) => Ok(()),
            None => Err("`or` requires a `rules` array".to_string()),
        }
    }
}
