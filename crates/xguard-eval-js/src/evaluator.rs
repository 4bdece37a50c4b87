//! Built-in expression evaluator using boa_engine.
//!
//! Every call runs in a fresh context, so nothing a script defines survives
//! into the next evaluation. Engine failures are classified into
//! [`FailureKind`] from the native error the engine raised.

use boa_engine::{Context, JsError, JsNativeErrorKind, Source};
use serde_json::Value;

use xguard_types::{ExpressionEvaluator, Failure, FailureKind};

/// Boa evaluator configuration
#[derive(Clone, Debug)]
pub struct BoaEvaluatorConfig {
    /// Max source length (bytes)
    pub max_code_length: usize,

    /// Max iterations of any single loop; `None` leaves loops unbounded
    pub loop_iteration_limit: Option<u64>,

    /// Whether scripts get a `console` object routed to tracing
    pub enable_console: bool,
}

impl Default for BoaEvaluatorConfig {
    fn default() -> Self {
        Self {
            max_code_length: 1_000_000, // 1MB
            loop_iteration_limit: Some(10_000_000),
            enable_console: true,
        }
    }
}

/// Expression evaluator backed by boa_engine
#[derive(Clone, Debug, Default)]
pub struct BoaEvaluator {
    config: BoaEvaluatorConfig,
}

impl BoaEvaluator {
    pub fn new(config: BoaEvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BoaEvaluatorConfig {
        &self.config
    }

    fn new_context(&self) -> Result<Context, Failure> {
        let mut context = Context::default();

        if let Some(limit) = self.config.loop_iteration_limit {
            context.runtime_limits_mut().set_loop_iteration_limit(limit);
        }

        if self.config.enable_console {
            crate::console::register_console(&mut context).map_err(|e| {
                Failure::other(format!("Failed to register console: {}", e))
            })?;
        }

        Ok(context)
    }
}

impl ExpressionEvaluator for BoaEvaluator {
    fn evaluate(&self, source: &str) -> Result<Value, Failure> {
        if source.len() > self.config.max_code_length {
            return Err(Failure::range(format!(
                "Code too large (max {} bytes, got {} bytes)",
                self.config.max_code_length,
                source.len()
            )));
        }

        let mut context = self.new_context()?;

        let result = context
            .eval(Source::from_bytes(source))
            .map_err(|e| classify(&e, &mut context))?;

        if result.is_undefined() {
            return Ok(Value::Null);
        }

        let value = result
            .to_json(&mut context)
            .map_err(|e| classify(&e, &mut context))?;
        Ok(normalize_numbers(value))
    }

    fn engine_name(&self) -> &str {
        "boa"
    }
}

/// Script numbers have no integer/float split; integral values come back
/// as JSON integers, the same as a `JSON.stringify` round trip would give.
fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
                Value::from(f as i64)
            }
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, normalize_numbers(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Map an engine error onto the failure taxonomy.
fn classify(error: &JsError, context: &mut Context) -> Failure {
    let Ok(native) = error.try_native(context) else {
        // A thrown value that is not an Error object
        return Failure::other(format!("Uncaught {}", error));
    };

    let kind = match native.kind {
        JsNativeErrorKind::Syntax => FailureKind::Syntax,
        JsNativeErrorKind::Type => FailureKind::Type,
        JsNativeErrorKind::Reference => FailureKind::Reference,
        JsNativeErrorKind::Range | JsNativeErrorKind::RuntimeLimit => FailureKind::Range,
        JsNativeErrorKind::Uri => FailureKind::Uri,
        _ => FailureKind::Other,
    };

    // Display renders "<Kind>" or "<Kind>: <message>"
    let rendered = native.to_string();
    let message = rendered
        .split_once(": ")
        .map(|(_, message)| message.to_string())
        .unwrap_or_default();

    Failure::new(kind, message)
}

// ================================
// Tests
// ================================
