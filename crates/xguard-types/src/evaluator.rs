use serde_json::Value;

use crate::failure::Failure;

/// Dynamic code evaluation capability.
///
/// Hosts decide how much of a language an evaluator supports; most will only
/// offer a restricted interpreter. Failures must carry the kind the engine
/// reported so guarded callers can dispatch on it.
pub trait ExpressionEvaluator: Send + Sync {
    /// Evaluate `source` and return the completion value as JSON.
    ///
    /// An `undefined` completion value maps to `Value::Null`.
    fn evaluate(&self, source: &str) -> Result<Value, Failure>;

    /// Engine name, used in diagnostics.
    fn engine_name(&self) -> &str;
}
