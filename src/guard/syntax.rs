use xguard_types::{ExpressionEvaluator, FailureKind};

/// Run `code` and describe the outcome.
///
/// Never fails: syntax failures are reported as `Syntax Error: ...`, every
/// other kind as `Other error: ...`.
pub fn check_syntax<E>(evaluator: &E, code: &str) -> String
where
    E: ExpressionEvaluator + ?Sized,
{
    match evaluator.evaluate(code) {
        Ok(_) => "No syntax errors found.".to_string(),
        Err(failure) if failure.kind == FailureKind::Syntax => {
            format!("Syntax Error: {}", failure.message)
        }
        Err(failure) => format!("Other error: {}", failure.message),
    }
}
