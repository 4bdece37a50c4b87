use xguard_types::{Failure, FailureKind};

use super::absorb;

/// Invoke `f`, absorbing a type failure.
///
/// Returns `Ok(None)` when `f` fails with [`FailureKind::Type`]; any other
/// failure is returned as-is.
pub fn handle_type_error<T, F>(f: F) -> Result<Option<T>, Failure>
where
    F: FnOnce() -> Result<T, Failure>,
{
    absorb(f().map(Some), FailureKind::Type, "Type Error", || None)
}

/// Invoke `f`, absorbing an out-of-range failure.
///
/// Returns `Ok(None)` when `f` fails with [`FailureKind::Range`]; any other
/// failure is returned as-is.
pub fn handle_range_error<T, F>(f: F) -> Result<Option<T>, Failure>
where
    F: FnOnce() -> Result<T, Failure>,
{
    absorb(f().map(Some), FailureKind::Range, "Range Error", || None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat(text: &str, count: i64) -> Result<String, Failure> {
        let count = usize::try_from(count)
            .map_err(|_| Failure::range(format!("Invalid count value: {}", count)))?;
        Ok(text.repeat(count))
    }

    fn to_upper(value: &serde_json::Value) -> Result<String, Failure> {
        value
            .as_str()
            .map(str::to_uppercase)
            .ok_or_else(|| Failure::type_error("value.toUpperCase is not a function"))
    }

    #[test]
    fn test_type_guard_success() {
        let value = serde_json::json!("abc");
        assert_eq!(handle_type_error(|| to_upper(&value)), Ok(Some("ABC".to_string())));
    }

    #[test]
    fn test_type_guard_absorbs_type_failure() {
        let value = serde_json::json!(42);
        assert_eq!(handle_type_error(|| to_upper(&value)), Ok(None));
    }

    #[test]
    fn test_type_guard_resignals_range_failure() {
        let err = handle_type_error(|| repeat("ab", -1)).unwrap_err();
        assert_eq!(err.kind, FailureKind::Range);
        assert_eq!(err.message, "Invalid count value: -1");
    }

    #[test]
    fn test_range_guard_success() {
        assert_eq!(handle_range_error(|| repeat("ab", 2)), Ok(Some("abab".to_string())));
    }

    #[test]
    fn test_range_guard_absorbs_range_failure() {
        assert_eq!(handle_range_error(|| repeat("ab", -3)), Ok(None));
    }

    #[test]
    fn test_range_guard_resignals_type_failure() {
        let value = serde_json::json!(null);
        let err = handle_range_error(|| to_upper(&value)).unwrap_err();
        assert_eq!(err.kind, FailureKind::Type);
    }
}
