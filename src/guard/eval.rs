use serde_json::Value;
use tracing::instrument;

use xguard_types::ExpressionEvaluator;

/// Evaluate `code`, swallowing every failure.
pub fn safe_eval<E>(evaluator: &E, code: &str) -> Option<Value>
where
    E: ExpressionEvaluator + ?Sized,
{
    match evaluator.evaluate(code) {
        Ok(value) => Some(value),
        Err(failure) => {
            tracing::error!(kind = %failure.kind, "Eval Error: {}", failure.message);
            None
        }
    }
}

/// Evaluate `code` inside a "Debugging Code Block" span, logging either the
/// value or a full diagnostic. The span closes on every return path.
#[instrument(name = "Debugging Code Block", skip_all, fields(engine = evaluator.engine_name()))]
pub fn debug_code<E>(evaluator: &E, code: &str) -> Option<Value>
where
    E: ExpressionEvaluator + ?Sized,
{
    match evaluator.evaluate(code) {
        Ok(value) => {
            tracing::info!("Success: {}", value);
            Some(value)
        }
        Err(failure) => {
            tracing::error!("Error Type: {}", failure.kind.name());
            tracing::error!("Error Message: {}", failure.message);
            tracing::error!(
                "Stack Trace: {}",
                failure.trace.as_deref().unwrap_or("<unavailable>")
            );
            tracing::error!("Code that caused error: {}", code);
            None
        }
    }
}
