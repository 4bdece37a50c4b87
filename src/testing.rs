//! Test doubles shared by unit tests.

use std::collections::HashMap;

use serde_json::Value;

use xguard_types::{ExpressionEvaluator, Failure};

/// Evaluator that answers from a fixed table of source texts.
#[derive(Default)]
pub(crate) struct ScriptedEvaluator {
    results: HashMap<String, Result<Value, Failure>>,
}

impl ScriptedEvaluator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ok(mut self, code: &str, value: Value) -> Self {
        self.results.insert(code.to_string(), Ok(value));
        self
    }

    pub(crate) fn fail(mut self, code: &str, failure: Failure) -> Self {
        self.results.insert(code.to_string(), Err(failure));
        self
    }
}

impl ExpressionEvaluator for ScriptedEvaluator {
    fn evaluate(&self, source: &str) -> Result<Value, Failure> {
        self.results
            .get(source)
            .cloned()
            .unwrap_or_else(|| Err(Failure::other(format!("no scripted result for {:?}", source))))
    }

    fn engine_name(&self) -> &str {
        "scripted"
    }
}
