use serde::{Deserialize, Serialize};

/// Nesting bound applied when no `[evaluator]` section is present.
pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Deepest rule nesting the evaluator will descend into. Rules nested
    /// beyond this evaluate to `false`.
    pub max_depth: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
