use crate::registry::ProcessorRegistry;
use crate::rule::{RuleDescriptor, RuleType};

/// Severity level for rule lint diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One finding about a rule tree. `path` points at the offending rule, e.g.
/// `/rules/1/rule`; the root is `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    pub severity: Severity,
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for LintIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}: {}", prefix, self.path, self.message)
    }
}

/// Statically check a rule tree against `registry` without evaluating it.
///
/// - unknown rule type (warning: evaluates to false)
/// - invalid parameters (error)
/// - explicit `fail` (warning)
/// - empty `or` (warning: never holds)
/// - nesting past the registry's `max_depth` (error, reported once per branch)
pub fn lint_rule(registry: &ProcessorRegistry, rule: &RuleDescriptor) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    lint_node(registry, rule, "", 0, &mut issues);
    issues
}

fn lint_node(
    registry: &ProcessorRegistry,
    rule: &RuleDescriptor,
    path: &str,
    depth: usize,
    issues: &mut Vec<LintIssue>,
) {
    let display_path = if path.is_empty() { "/" } else { path };
    let mut push = |severity, message: String| {
        issues.push(LintIssue {
            severity,
            path: display_path.to_string(),
            message,
        })
    };

    if depth >= registry.max_depth() {
        push(
            Severity::Error,
            format!(
                "nesting exceeds max_depth {}; this rule evaluates to false",
                registry.max_depth()
            ),
        );
        return;
    }

    if !registry.is_known(&rule.rule_type) {
        let message = if rule.rule_type.is_empty() {
            "missing rule type; evaluates to false".to_string()
        } else {
            format!("unknown rule type `{}`; evaluates to false", rule.rule_type)
        };
        push(Severity::Warning, message);
        return;
    }

    if let Err(reason) = registry.get_processor(&rule.rule_type).validate(rule) {
        push(
            Severity::Error,
            format!("invalid `{}` rule: {}", rule.rule_type, reason),
        );
        return;
    }

    match rule.known_type() {
        Some(RuleType::Fail) => {
            push(Severity::Warning, "`fail` rule never holds".to_string());
        }
        Some(RuleType::Or) if rule.rules.as_ref().is_some_and(Vec::is_empty) => {
            push(Severity::Warning, "empty `or` never holds".to_string());
        }
        _ => {}
    }

    match rule.known_type() {
        Some(RuleType::Not) => {
            if let Some(inner) = rule.rule.as_deref() {
                lint_node(registry, inner, &format!("{path}/rule"), depth + 1, issues);
            }
        }
        Some(RuleType::Or | RuleType::And) => {
            for (i, inner) in rule.rules.iter().flatten().enumerate() {
                lint_node(registry, inner, &format!("{path}/rules/{i}"), depth + 1, issues);
            }
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::test_support::*;

    use super::*;

    fn lint(rule: &RuleDescriptor) -> Vec<LintIssue> {
        lint_rule(&registry_at(0, &[]), rule)
    }

    #[test]
    fn clean_tree() {
        let rule = RuleDescriptor::or(vec![
            RuleDescriptor::plugins_activated(["jetpack"]),
            RuleDescriptor::not(RuleDescriptor::send_at_time(ts(100))),
            RuleDescriptor::plugin_version("woocommerce", ">=", "4.5"),
        ]);
        assert!(lint(&rule).is_empty());
    }

    #[test]
    fn unknown_type_is_warning_with_path() {
        let rule = RuleDescriptor::and(vec![
            RuleDescriptor::fail(),
            RuleDescriptor::not(RuleDescriptor::new("is_ecommerce")),
        ]);
        let issues = lint(&rule);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].path, "/rules/0");
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[1].path, "/rules/1/rule");
        assert_eq!(
            issues[1].to_string(),
            "warning: /rules/1/rule: unknown rule type `is_ecommerce`; evaluates to false"
        );
    }

    #[test]
    fn missing_type() {
        let issues = lint(&RuleDescriptor::new(""));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "/");
        assert!(issues[0].message.contains("missing rule type"));
    }

    #[test]
    fn invalid_params_are_errors() {
        let rule = RuleDescriptor::or(vec![RuleDescriptor::plugin_version("x", "~", "1")]);
        let issues = lint(&rule);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].path, "/rules/0");
        assert!(issues[0].message.contains("invalid `plugin_version` rule"));
    }

    #[test]
    fn empty_or_warns() {
        let issues = lint(&RuleDescriptor::or(vec![]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "empty `or` never holds");
    }

    #[test]
    fn depth_reported_once() {
        let reg = registry_at(0, &[]).with_max_depth(2);
        let rule = RuleDescriptor::not(RuleDescriptor::not(RuleDescriptor::not(
            RuleDescriptor::fail(),
        )));
        let issues = lint_rule(&reg, &rule);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].path, "/rule/rule");
    }

    #[test]
    fn registered_types_are_known() {
        use crate::evaluator::EvalContext;
        use crate::processor::RuleProcessor;

        struct Never;
        impl RuleProcessor for Never {
            fn evaluate(&self, _: &RuleDescriptor, _: &EvalContext) -> bool {
                false
            }
        }

        let mut reg = registry_at(0, &[]);
        reg.register("stored_state", |_| Box::new(Never)).unwrap();
        assert!(lint_rule(&reg, &RuleDescriptor::new("stored_state")).is_empty());
    }
}
