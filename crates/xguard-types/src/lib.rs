pub mod evaluator;
pub mod failure;

pub use evaluator::ExpressionEvaluator;
pub use failure::{Failure, FailureKind, FailureResult};
