use rinds_config::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::RuleType;

// ---------------------------------------------------------------------------
// RuleDescriptor
// ---------------------------------------------------------------------------

/// One condition in a rule tree: a `type` tag, type-specific parameters and,
/// for combinators, nested rules.
///
/// ```json
/// { "type": "or", "rules": [
///     { "type": "plugins_activated", "plugins": ["jetpack"] },
///     { "type": "send_at_time", "send_at": "2024-03-01 09:00:00" }
/// ] }
/// ```
///
/// A missing `type` deserializes as the empty tag, which resolves to the
/// fail-safe processor like any other unknown tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    #[serde(rename = "type", default)]
    pub rule_type: String,
    /// Single nested rule (`not`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<Box<RuleDescriptor>>,
    /// Ordered nested rules (`or`, `and`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<RuleDescriptor>>,
    /// Every other key of the rule object.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl RuleDescriptor {
    pub fn new(rule_type: impl Into<String>) -> Self {
        Self {
            rule_type: rule_type.into(),
            rule: None,
            rules: None,
            params: Map::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_rule(mut self, rule: RuleDescriptor) -> Self {
        self.rule = Some(Box::new(rule));
        self
    }

    pub fn with_rules(mut self, rules: Vec<RuleDescriptor>) -> Self {
        self.rules = Some(rules);
        self
    }

    // -- built-in shapes ----------------------------------------------------

    pub fn plugins_activated<I, S>(plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slugs: Vec<Value> = plugins.into_iter().map(|s| Value::String(s.into())).collect();
        Self::new(RuleType::PluginsActivated.as_str()).with_param("plugins", slugs)
    }

    pub fn send_at_time(send_at: Timestamp) -> Self {
        Self::new(RuleType::SendAtTime.as_str()).with_param("send_at", send_at.to_string())
    }

    pub fn plugin_version(plugin: &str, operator: &str, version: &str) -> Self {
        Self::new(RuleType::PluginVersion.as_str())
            .with_param("plugin", plugin)
            .with_param("operator", operator)
            .with_param("version", version)
    }

    pub fn not(rule: RuleDescriptor) -> Self {
        Self::new(RuleType::Not.as_str()).with_rule(rule)
    }

    pub fn or(rules: Vec<RuleDescriptor>) -> Self {
        Self::new(RuleType::Or.as_str()).with_rules(rules)
    }

    pub fn and(rules: Vec<RuleDescriptor>) -> Self {
        Self::new(RuleType::And.as_str()).with_rules(rules)
    }

    pub fn fail() -> Self {
        Self::new(RuleType::Fail.as_str())
    }

    // -- parameter access ---------------------------------------------------

    /// The built-in type this rule's tag names, if any.
    pub fn known_type(&self) -> Option<RuleType> {
        RuleType::from_tag(&self.rule_type)
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// A string parameter. `None` when missing or not a string.
    pub fn str_param(&self, key: &str) -> Option<&str> {
        self.param(key).and_then(Value::as_str)
    }

    /// A list-of-strings parameter. `None` when missing, not an array, or
    /// when any element is not a string.
    pub fn str_list_param(&self, key: &str) -> Option<Vec<&str>> {
        self.param(key)?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
