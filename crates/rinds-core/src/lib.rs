#[macro_use]
mod log_macros;

pub mod error;
pub mod evaluator;
pub mod lint;
pub mod processor;
pub mod provider;
pub mod registry;
pub mod rule;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{CoreError, CoreReason, CoreResult};
pub use evaluator::{EvalContext, RuleEvaluator};
pub use lint::{LintIssue, Severity, lint_rule};
pub use processor::RuleProcessor;
pub use provider::{DateTimeProvider, PluginsProvider};
pub use registry::ProcessorRegistry;
pub use rule::{RuleDescriptor, RuleType, load_rules, parse_rules};
