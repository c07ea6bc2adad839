use crate::evaluator::{EvalContext, RuleEvaluator};
use crate::rule::RuleDescriptor;

use super::RuleProcessor;

/// Holds when every nested rule holds; stops at the first that does not.
/// An empty list holds.
pub struct AndRuleProcessor<'r> {
    evaluator: RuleEvaluator<'r>,
}

impl<'r> AndRuleProcessor<'r> {
    pub fn new(evaluator: RuleEvaluator<'r>) -> Self {
        Self { evaluator }
    }
}

impl RuleProcessor for AndRuleProcessor<'_> {
    fn evaluate(&self, rule: &RuleDescriptor, ctx: &EvalContext) -> bool {
        rule.rules
            .iter()
            .flatten()
            .all(|inner| self.evaluator.evaluate(inner, ctx))
    }

    fn validate(&self, rule: &RuleDescriptor) -> Result<(), String> {
        match rule.rules {
            Some(_) => Ok(()),
            None => Err("`and` requires a `rules` array".to_string()),
        }
    }
}
