use serde_json::Value;

use xguard_types::{Failure, FailureKind};

use super::absorb;

/// Look up a dot-delimited `path` under `root`.
///
/// The walk stops at the first null or missing segment and returns
/// `default` (or `Value::Null`). A segment applied to an array is read as a
/// decimal index. An explicit `null` at the end of the path is returned as-is.
///
/// Missing segments are an expected outcome rather than a reference
/// failure. The reference branch is kept so this guard has the same shape
/// as the others, but a walk over `Value` never takes it.
pub fn safe_access(root: &Value, path: &str, default: Option<Value>) -> Value {
    let found = lookup(root, path).map(|found| found.cloned());
    let default = default.unwrap_or(Value::Null);
    match absorb(found, FailureKind::Reference, "Reference Error", || None) {
        Ok(Some(value)) => value,
        // Only reference failures can come out of `lookup`
        Ok(None) | Err(_) => default,
    }
}

fn lookup<'a>(root: &'a Value, path: &str) -> Result<Option<&'a Value>, Failure> {
    let mut current = root;
    for key in path.split('.') {
        if current.is_null() {
            return Ok(None);
        }
        match child(current, key) {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => {
            let index: usize = key.parse().ok()?;
            // "01" or "+1" are property names, not indices
            if index.to_string() != key {
                return None;
            }
            items.get(index)
        }
        _ => None,
    }
}
