//! Error types for xguard.
//!
//! Guarded primitives fail with a [`Failure`] tagged by [`FailureKind`].
//! Building the bundle or installing listeners fails with a [`GuardError`].

pub mod guard_error;

pub use guard_error::GuardError;
pub use xguard_types::{Failure, FailureKind, FailureResult};

/// Convenience alias for setup-level results.
pub type GuardResult<T> = Result<T, GuardError>;
