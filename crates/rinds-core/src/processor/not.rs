use crate::evaluator::{EvalContext, RuleEvaluator};
use crate::rule::RuleDescriptor;

use super::RuleProcessor;

/// Negates the nested `rule`.
pub struct NotRuleProcessor<'r> {
    evaluator: RuleEvaluator<'r>,
}

impl<'r> NotRuleProcessor<'r> {
    pub fn new(evaluator: RuleEvaluator<'r>) -> Self {
        Self { evaluator }
    }
}

impl RuleProcessor for NotRuleProcessor<'_> {
    fn evaluate(&self, rule: &RuleDescriptor, ctx: &EvalContext) -> bool {
        match rule.rule.as_deref() {
            Some(inner) => !self.evaluator.evaluate(inner, ctx),
            None => false,
        }
    }

    fn validate(&self, rule: &RuleDescriptor) -> Result<(), String> {
        match rule.rule {
            Some(_) => Ok(()),
            None => Err("`not` requires a nested `rule`".to_string()),
        }
    }
}
