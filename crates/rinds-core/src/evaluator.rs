use rinds_config::evaluator::DEFAULT_MAX_DEPTH;

use crate::registry::ProcessorRegistry;
use crate::rule::RuleDescriptor;

// ---------------------------------------------------------------------------
// EvalContext
// ---------------------------------------------------------------------------

/// Per-pass evaluation state threaded through nested rules.
///
/// Only tracks nesting: ambient facts come from the providers wired into
/// each processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalContext {
    depth: usize,
    max_depth: usize,
}

impl EvalContext {
    /// Root context allowing `max_depth` levels of nesting.
    pub fn new(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn descend(&self) -> Self {
        Self {
            depth: self.depth + 1,
            max_depth: self.max_depth,
        }
    }

    fn exhausted(&self) -> bool {
        self.depth >= self.max_depth
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

// ---------------------------------------------------------------------------
// RuleEvaluator
// ---------------------------------------------------------------------------

/// Resolves a rule's processor through the registry and runs it.
///
/// This is the single recursion point: combinator processors hold an
/// evaluator and call it for each nested rule, so nested and top-level rules
/// dispatch identically.
#[derive(Debug, Clone, Copy)]
pub struct RuleEvaluator<'r> {
    registry: &'r ProcessorRegistry,
}

impl<'r> RuleEvaluator<'r> {
    pub fn new(registry: &'r ProcessorRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate one rule. Never fails: rules past the depth bound, rules with
    /// invalid parameters and rules of unknown type all yield `false`.
    pub fn evaluate(&self, rule: &RuleDescriptor, ctx: &EvalContext) -> bool {
        if ctx.exhausted() {
            rd_warn!(
                rule,
                rule_type = %rule.rule_type,
                max_depth = ctx.max_depth(),
                "rule nesting exceeds max_depth; treating as unsatisfied"
            );
            return false;
        }

        let processor = self.registry.get_processor(&rule.rule_type);
        if let Err(reason) = processor.validate(rule) {
            rd_warn!(
                rule,
                rule_type = %rule.rule_type,
                depth = ctx.depth(),
                reason = %reason,
                "invalid rule; treating as unsatisfied"
            );
            return false;
        }

        let result = processor.evaluate(rule, &ctx.descend());
        rd_trace!(
            rule,
            rule_type = %rule.rule_type,
            depth = ctx.depth(),
            result,
            "rule evaluated"
        );
        result
    }

    /// Evaluate a trigger list: every rule must hold. Stops at the first
    /// unsatisfied rule; an empty list holds vacuously.
    pub fn evaluate_all(&self, rules: &[RuleDescriptor], ctx: &EvalContext) -> bool {
        rules.iter().all(|rule| self.evaluate(rule, ctx))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
