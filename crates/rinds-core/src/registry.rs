use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use orion_error::prelude::*;
use rinds_config::RindsConfig;

use crate::error::{CoreReason, CoreResult};
use crate::evaluator::{EvalContext, RuleEvaluator};
use crate::processor::{
    AndRuleProcessor, FailRuleProcessor, NotRuleProcessor, OrRuleProcessor,
    PluginVersionRuleProcessor, PluginsActivatedRuleProcessor, RuleProcessor,
    SendAtTimeRuleProcessor,
};
use crate::provider::{
    CurrentDateTimeProvider, DateTimeProvider, FixedDateTimeProvider,
    InventoryFilePluginsProvider, PluginsProvider, StaticPluginsProvider,
};
use crate::rule::{RuleDescriptor, RuleType};

/// Builds a processor for a custom rule type. The factory receives the
/// registry so it can take provider handles or an evaluator for nested rules.
pub type ProcessorFactory =
    Arc<dyn for<'r> Fn(&'r ProcessorRegistry) -> Box<dyn RuleProcessor + 'r> + Send + Sync>;

// ---------------------------------------------------------------------------
// ProcessorRegistry
// ---------------------------------------------------------------------------

/// Maps a rule-type tag to a freshly built processor wired with its
/// dependencies.
///
/// Built once per evaluation request and borrowed by the evaluators it hands
/// to combinators, so nested rules resolve exactly like top-level ones.
/// Lookup is total: tags that are neither built in nor registered resolve to
/// [`FailRuleProcessor`].
pub struct ProcessorRegistry {
    clock: Arc<dyn DateTimeProvider>,
    plugins: Arc<dyn PluginsProvider>,
    max_depth: usize,
    custom: HashMap<String, ProcessorFactory>,
}

impl std::fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("max_depth", &self.max_depth)
            .field("custom_types", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ProcessorRegistry {
    pub fn new(clock: Arc<dyn DateTimeProvider>, plugins: Arc<dyn PluginsProvider>) -> Self {
        Self {
            clock,
            plugins,
            max_depth: rinds_config::evaluator::DEFAULT_MAX_DEPTH,
            custom: HashMap::new(),
        }
    }

    /// Build the providers a [`RindsConfig`] names.
    ///
    /// - `[clock] now` pins the clock; otherwise the wall clock is used.
    /// - `[inventory] file` is resolved against `base_dir` when relative;
    ///   otherwise the inline `[[inventory.plugins]]` entries are used.
    pub fn from_config(config: &RindsConfig, base_dir: &Path) -> Self {
        let clock: Arc<dyn DateTimeProvider> = match config.clock.now {
            Some(now) => Arc::new(FixedDateTimeProvider::from(now)),
            None => Arc::new(CurrentDateTimeProvider),
        };

        let plugins: Arc<dyn PluginsProvider> = match &config.inventory.file {
            Some(file) => {
                let resolved = if file.is_relative() {
                    base_dir.join(file)
                } else {
                    file.clone()
                };
                rd_debug!(conf, file = %resolved.display(), "using plugin inventory file");
                Arc::new(InventoryFilePluginsProvider::new(resolved))
            }
            None => {
                let inline = StaticPluginsProvider::new(config.inventory.plugins.clone());
                rd_debug!(conf, plugins = inline.len(), "using inline plugin inventory");
                Arc::new(inline)
            }
        };

        Self::new(clock, plugins).with_max_depth(config.evaluator.max_depth)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Register a processor for a tag outside the built-in set.
    ///
    /// Built-in tags cannot be overridden and each tag registers once. The
    /// factory runs on every lookup with this registry as its argument.
    pub fn register<F>(&mut self, rule_type: impl Into<String>, factory: F) -> CoreResult<()>
    where
        F: for<'r> Fn(&'r ProcessorRegistry) -> Box<dyn RuleProcessor + 'r> + Send + Sync + 'static,
    {
        let rule_type = rule_type.into();
        if RuleType::from_tag(&rule_type).is_some() {
            return StructError::from(CoreReason::Registry)
                .with_detail(format!("cannot override built-in rule type {rule_type:?}"))
                .err();
        }
        if self.custom.contains_key(&rule_type) {
            return StructError::from(CoreReason::Registry)
                .with_detail(format!("rule type {rule_type:?} already registered"))
                .err();
        }
        self.custom.insert(rule_type, Arc::new(factory));
        Ok(())
    }

    /// Is `rule_type` built in or registered?
    pub fn is_known(&self, rule_type: &str) -> bool {
        RuleType::from_tag(rule_type).is_some() || self.custom.contains_key(rule_type)
    }

    /// Build the processor for `rule_type`. Never fails.
    pub fn get_processor(&self, rule_type: &str) -> Box<dyn RuleProcessor + '_> {
        let Some(known) = RuleType::from_tag(rule_type) else {
            if let Some(factory) = self.custom.get(rule_type) {
                return factory(self);
            }
            rd_debug!(rule, rule_type, "unknown rule type; using fail processor");
            return Box::new(FailRuleProcessor);
        };

        match known {
            RuleType::PluginsActivated => {
                Box::new(PluginsActivatedRuleProcessor::new(self.plugins()))
            }
            RuleType::SendAtTime => Box::new(SendAtTimeRuleProcessor::new(self.clock())),
            RuleType::PluginVersion => Box::new(PluginVersionRuleProcessor::new(self.plugins())),
            RuleType::Not => Box::new(NotRuleProcessor::new(self.evaluator())),
            RuleType::Or => Box::new(OrRuleProcessor::new(self.evaluator())),
            RuleType::And => Box::new(AndRuleProcessor::new(self.evaluator())),
            RuleType::Fail => Box::new(FailRuleProcessor),
        }
    }

    /// Clock handle shared with time-based processors.
    pub fn clock(&self) -> Arc<dyn DateTimeProvider> {
        Arc::clone(&self.clock)
    }

    /// Inventory handle shared with plugin processors.
    pub fn plugins(&self) -> Arc<dyn PluginsProvider> {
        Arc::clone(&self.plugins)
    }

    pub fn evaluator(&self) -> RuleEvaluator<'_> {
        RuleEvaluator::new(self)
    }

    /// Root context bounded by this registry's `max_depth`.
    pub fn context(&self) -> EvalContext {
        EvalContext::new(self.max_depth)
    }

    /// Evaluate `rule` from a fresh root context.
    pub fn evaluate(&self, rule: &RuleDescriptor) -> bool {
        self.evaluator().evaluate(rule, &self.context())
    }

    /// Evaluate a trigger list from a fresh root context.
    pub fn evaluate_all(&self, rules: &[RuleDescriptor]) -> bool {
        self.evaluator().evaluate_all(rules, &self.context())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::test_support::*;

    use super::*;

    struct AlwaysTrue;

    impl RuleProcessor for AlwaysTrue {
        fn evaluate(&self, _rule: &RuleDescriptor, _ctx: &EvalContext) -> bool {
            true
        }
    }

    fn always_true(_: &ProcessorRegistry) -> Box<dyn RuleProcessor + '_> {
        Box::new(AlwaysTrue)
    }

    /// Holds while the clock is before `until` (unix seconds).
    struct Before(Arc<dyn DateTimeProvider>);

    impl RuleProcessor for Before {
        fn evaluate(&self, rule: &RuleDescriptor, _ctx: &EvalContext) -> bool {
            let until = rule.param("until").and_then(Value::as_i64);
            until.is_some_and(|until| self.0.now().timestamp() < until)
        }
    }

    fn before(reg: &ProcessorRegistry) -> Box<dyn RuleProcessor + '_> {
        Box::new(Before(reg.clock()))
    }

    /// Holds when exactly one nested rule holds.
    struct ExactlyOne<'r>(RuleEvaluator<'r>);

    impl RuleProcessor for ExactlyOne<'_> {
        fn evaluate(&self, rule: &RuleDescriptor, ctx: &EvalContext) -> bool {
            let mut held = 0;
            for inner in rule.rules.iter().flatten() {
                if self.0.evaluate(inner, ctx) {
                    held += 1;
                }
            }
            held == 1
        }
    }

    fn exactly_one(reg: &ProcessorRegistry) -> Box<dyn RuleProcessor + '_> {
        Box::new(ExactlyOne(reg.evaluator()))
    }

    #[test]
    fn every_builtin_tag_resolves() {
        let reg = registry_at(100, &[]);
        for ty in RuleType::ALL {
            assert!(reg.is_known(ty.as_str()));
            // Resolution itself must not panic for any built-in.
            let _ = reg.get_processor(ty.as_str());
        }
    }

    #[test]
    fn unknown_tag_resolves_to_fail_for_any_rule() {
        let reg = registry_at(100, &[("jetpack", Some("9.1"), true)]);
        let ctx = reg.context();
        let inputs = [
            RuleDescriptor::new("nope"),
            RuleDescriptor::new("nope").with_param("plugins", json!(["jetpack"])),
            RuleDescriptor::new("nope").with_rules(vec![RuleDescriptor::and(vec![])]),
            RuleDescriptor::new("nope").with_rule(RuleDescriptor::fail()),
        ];
        for tag in ["nope", "", "Or", "stored_state"] {
            assert!(!reg.is_known(tag));
            let processor = reg.get_processor(tag);
            for rule in &inputs {
                assert!(processor.validate(rule).is_ok());
                assert!(!processor.evaluate(rule, &ctx));
            }
        }
    }

    #[test]
    fn custom_type_dispatches() {
        let mut reg = registry_at(100, &[]);
        reg.register("always", always_true).unwrap();
        assert!(reg.is_known("always"));
        assert!(reg.evaluate(&RuleDescriptor::new("always")));
        assert!(!reg.evaluate(&RuleDescriptor::not(RuleDescriptor::new("always"))));
    }

    #[test]
    fn custom_type_reads_registry_clock() {
        let mut reg = registry_at(100, &[]);
        reg.register("before", before).unwrap();
        let until = |secs: i64| RuleDescriptor::new("before").with_param("until", secs);
        assert!(reg.evaluate(&until(101)));
        assert!(!reg.evaluate(&until(100)));
    }

    #[test]
    fn custom_type_evaluates_nested_rules() {
        let mut reg = registry_at(100, &[("jetpack", Some("9.1"), true)]);
        reg.register("exactly_one", exactly_one).unwrap();
        let one_of = |rules| RuleDescriptor::new("exactly_one").with_rules(rules);

        let jetpack = RuleDescriptor::plugins_activated(["jetpack"]);
        let payments = RuleDescriptor::plugins_activated(["woocommerce-payments"]);
        let due = RuleDescriptor::send_at_time(ts(50));

        assert!(reg.evaluate(&one_of(vec![jetpack.clone(), payments])));
        assert!(!reg.evaluate(&one_of(vec![jetpack, due])));
        assert!(!reg.evaluate(&one_of(vec![])));
    }

    #[test]
    fn custom_type_cannot_shadow_builtin() {
        let mut reg = registry_at(100, &[]);
        let err = reg.register("fail", always_true).unwrap_err();
        assert!(err.to_string().contains("processor registry error"), "{err}");
        assert!(!reg.evaluate(&RuleDescriptor::fail()));
    }

    #[test]
    fn custom_type_registers_once() {
        let mut reg = registry_at(100, &[]);
        reg.register("always", always_true).unwrap();
        assert!(reg.register("always", always_true).is_err());
    }

    #[test]
    fn from_config_inline_inventory_and_fixed_clock() {
        let config: RindsConfig = r#"
[evaluator]
max_depth = 5

[clock]
now = "2024-03-01 09:00:00"

[[inventory.plugins]]
slug = "jetpack"
version = "9.1"
"#
        .parse()
        .unwrap();
        let reg = ProcessorRegistry::from_config(&config, Path::new("/"));

        assert_eq!(reg.max_depth(), 5);
        assert!(reg.evaluate(&RuleDescriptor::plugins_activated(["jetpack"])));
        assert!(reg.evaluate(&RuleDescriptor::plugin_version("jetpack", ">=", "9")));
        let send_at = |at: &str| RuleDescriptor::new("send_at_time").with_param("send_at", at);
        assert!(reg.evaluate(&send_at("2024-03-01 09:00:00")));
        assert!(!reg.evaluate(&send_at("2024-03-01 09:00:01")));
    }

    #[test]
    fn from_config_relative_inventory_file() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = dir.path().join("plugins.json");
        std::fs::write(&inventory, r#"[{ "slug": "jetpack", "version": "9.1" }]"#).unwrap();

        let config: RindsConfig = "[inventory]\nfile = \"plugins.json\"\n".parse().unwrap();
        let reg = ProcessorRegistry::from_config(&config, dir.path());
        assert!(reg.evaluate(&RuleDescriptor::plugins_activated(["jetpack"])));
    }

    #[test]
    fn debug_lists_custom_types() {
        let mut reg = registry_at(100, &[]);
        reg.register("always", always_true).unwrap();
        let dbg = format!("{reg:?}");
        assert!(dbg.contains("always"), "{dbg}");
        assert!(dbg.contains("max_depth"), "{dbg}");
    }
}
