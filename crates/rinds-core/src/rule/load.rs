use std::path::Path;

use orion_error::prelude::*;
use serde_json::Value;

use crate::error::{CoreReason, CoreResult};

use super::RuleDescriptor;

/// Parse a JSON rule document: either a single rule object or an array of
/// rules (a trigger list).
pub fn parse_rules(json: &str) -> CoreResult<Vec<RuleDescriptor>> {
    let value: Value = serde_json::from_str(json).owe(CoreReason::RuleParse)?;
    match value {
        Value::Array(_) => serde_json::from_value(value).owe(CoreReason::RuleParse),
        Value::Object(_) => {
            let rule: RuleDescriptor =
                serde_json::from_value(value).owe(CoreReason::RuleParse)?;
            Ok(vec![rule])
        }
        other => StructError::from(CoreReason::RuleParse)
            .with_detail(format!(
                "expected a rule object or an array of rules, got {}",
                json_kind(&other)
            ))
            .err(),
    }
}

/// Read and parse a JSON rule file.
pub fn load_rules(path: &Path) -> CoreResult<Vec<RuleDescriptor>> {
    let content = std::fs::read_to_string(path)
        .owe(CoreReason::RuleLoad)
        .position(path.display().to_string())?;
    let rules = parse_rules(&content).position(path.display().to_string())?;
    rd_debug!(conf, file = %path.display(), rules = rules.len(), "loaded rule file");
    Ok(rules)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn single_object() {
        let rules = parse_rules(r#"{ "type": "fail" }"#).unwrap();
        assert_eq!(rules, vec![RuleDescriptor::fail()]);
    }

    #[test]
    fn array_of_rules() {
        let rules = parse_rules(
            r#"[
                { "type": "plugins_activated", "plugins": ["jetpack"] },
                { "type": "fail" }
            ]"#,
        )
        .unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], RuleDescriptor::plugins_activated(["jetpack"]));
    }

    #[test]
    fn empty_array() {
        assert!(parse_rules("[]").unwrap().is_empty());
    }

    #[test]
    fn scalar_rejected() {
        let err = parse_rules("42").unwrap_err();
        assert!(err.to_string().contains("rule parse error"), "{err}");
        assert!(err.to_string().contains("a number"), "{err}");
    }

    #[test]
    fn malformed_json_rejected() {
        let err = parse_rules("{ \"type\": ").unwrap_err();
        assert!(err.to_string().contains("rule parse error"), "{err}");
    }

    #[test]
    fn nested_rule_must_be_object() {
        let err = parse_rules(r#"{ "type": "not", "rule": 5 }"#).unwrap_err();
        assert!(err.to_string().contains("rule parse error"), "{err}");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "type": "or", "rules": [] }}"#).unwrap();
        let rules = load_rules(file.path()).unwrap();
        assert_eq!(rules, vec![RuleDescriptor::or(vec![])]);
    }

    #[test]
    fn load_missing_file() {
        let err = load_rules(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(err.to_string().contains("rule load error"), "{err}");
    }
}
