use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use xguard_types::{Failure, FailureKind};

use super::absorb;

/// Parse `text` as JSON, falling back to `default` (or `{}`) when it is
/// malformed.
pub fn safe_json_parse(text: &str, default: Option<Value>) -> Value {
    match serde_json::from_str(text) {
        Ok(value) => value,
        // Decoding into `Value` from a string only fails with syntax or EOF
        // errors (nesting depth included), all of which are absorbed
        Err(e) => {
            let failure = Failure::from(e);
            tracing::error!(kind = %failure.kind, "JSON Parse Error: {}", failure.message);
            default.unwrap_or_else(|| Value::Object(Map::new()))
        }
    }
}

/// Parse `text` into `T`, falling back to `default` when it is malformed.
///
/// Well-formed JSON that does not fit `T` is a type failure and is returned
/// to the caller.
pub fn safe_json_parse_as<T: DeserializeOwned>(text: &str, default: T) -> Result<T, Failure> {
    let parsed = serde_json::from_str(text).map_err(Failure::from);
    absorb(parsed, FailureKind::Syntax, "JSON Parse Error", || default)
}
