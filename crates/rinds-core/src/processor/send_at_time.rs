use std::sync::Arc;

use chrono::{DateTime, Utc};
use rinds_config::Timestamp;
use serde_json::Value;

use crate::evaluator::EvalContext;
use crate::provider::DateTimeProvider;
use crate::rule::RuleDescriptor;

use super::RuleProcessor;

/// Holds once the injected clock reaches `send_at`.
pub struct SendAtTimeRuleProcessor {
    clock: Arc<dyn DateTimeProvider>,
}

impl SendAtTimeRuleProcessor {
    pub fn new(clock: Arc<dyn DateTimeProvider>) -> Self {
        Self { clock }
    }
}

impl RuleProcessor for SendAtTimeRuleProcessor {
    fn evaluate(&self, rule: &RuleDescriptor, _ctx: &EvalContext) -> bool {
        match parse_send_at(rule) {
            Ok(send_at) => self.clock.now() >= send_at,
            Err(_) => false,
        }
    }

    fn validate(&self, rule: &RuleDescriptor) -> Result<(), String> {
        parse_send_at(rule).map(|_| ())
    }
}

/// Read `send_at` as a timestamp string or integer Unix seconds.
pub fn parse_send_at(rule: &RuleDescriptor) -> Result<DateTime<Utc>, String> {
    match rule.param("send_at") {
        Some(Value::String(s)) => s
            .parse::<Timestamp>()
            .map(|ts| ts.as_datetime())
            .map_err(|e| format!("`send_at`: {e}")),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(Timestamp::from_unix)
            .map(|ts| ts.as_datetime())
            .ok_or_else(|| format!("`send_at`: {n} is not a valid unix timestamp")),
        Some(_) => Err("`send_at` must be a timestamp string or unix seconds".to_string()),
        None => Err("missing `send_at`".to_string()),
    }
}
