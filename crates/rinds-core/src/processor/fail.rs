use crate::evaluator::EvalContext;
use crate::rule::RuleDescriptor;

use super::RuleProcessor;

/// Never holds. Backs the explicit `fail` type and every unknown tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailRuleProcessor;

impl RuleProcessor for FailRuleProcessor {
    fn evaluate(&self, _rule: &RuleDescriptor, _ctx: &EvalContext) -> bool {
        false
    }
}
