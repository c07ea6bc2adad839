mod and;
mod fail;
mod not;
mod or;
mod plugin_version;
mod plugins_activated;
mod send_at_time;

use crate::evaluator::EvalContext;
use crate::rule::RuleDescriptor;

pub use and::AndRuleProcessor;
pub use fail::FailRuleProcessor;
pub use not::NotRuleProcessor;
pub use or::OrRuleProcessor;
pub use plugin_version::PluginVersionRuleProcessor;
pub use plugins_activated::PluginsActivatedRuleProcessor;
pub use send_at_time::{SendAtTimeRuleProcessor, parse_send_at};

/// Evaluates one rule type.
///
/// Processors are built per lookup by the
/// [`ProcessorRegistry`](crate::registry::ProcessorRegistry) and hold only
/// their injected dependencies.
pub trait RuleProcessor {
    /// Does `rule` hold? `ctx` is already one level below the rule itself;
    /// combinators pass it unchanged to their evaluator.
    fn evaluate(&self, rule: &RuleDescriptor, ctx: &EvalContext) -> bool;

    /// Check that `rule` carries the parameters this processor needs.
    /// Rules that fail validation evaluate to `false` without reaching
    /// [`evaluate`](Self::evaluate).
    fn validate(&self, rule: &RuleDescriptor) -> Result<(), String> {
        let _ = rule;
        Ok(())
    }
}
