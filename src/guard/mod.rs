//! Guarded operations.
//!
//! Each wrapper attempts one fallible primitive. A failure of the wrapper's
//! target kind is logged and replaced by a fallback value; any other kind is
//! handed back to the caller unchanged.

pub mod access;
pub mod call;
pub mod dom;
pub mod eval;
pub mod fetch;
pub mod json;
pub mod syntax;
pub mod uri;

pub use access::safe_access;
pub use call::{handle_range_error, handle_type_error};
pub use dom::safe_query_selector;
pub use eval::{debug_code, safe_eval};
pub use fetch::safe_fetch;
pub use json::{safe_json_parse, safe_json_parse_as};
pub use syntax::check_syntax;
pub use uri::{decode_uri, safe_decode_uri};

use xguard_types::{Failure, FailureKind};

/// Replace a failure of `target` kind with `fallback`, re-signal the rest.
pub(crate) fn absorb<T>(
    result: Result<T, Failure>,
    target: FailureKind,
    label: &str,
    fallback: impl FnOnce() -> T,
) -> Result<T, Failure> {
    match result {
        Ok(value) => Ok(value),
        Err(failure) if failure.kind == target => {
            tracing::error!(kind = %failure.kind, "{}: {}", label, failure.message);
            Ok(fallback())
        }
        Err(failure) => Err(failure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_passes_success_through() {
        let result = absorb(Ok(5), FailureKind::Type, "Type Error", || 0);
        assert_eq!(result, Ok(5));
    }

    #[test]
    fn test_absorb_matching_kind() {
        let result = absorb(
            Err(Failure::type_error("not a function")),
            FailureKind::Type,
            "Type Error",
            || -1,
        );
        assert_eq!(result, Ok(-1));
    }

    #[test]
    fn test_absorb_other_kind_is_unchanged() {
        let original = Failure::range("Invalid array length").with_input("new Array(-1)");
        let result = absorb(Err(original.clone()), FailureKind::Type, "Type Error", || 0);
        assert_eq!(result, Err(original));
    }
}
