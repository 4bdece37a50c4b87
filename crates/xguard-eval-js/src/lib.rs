pub mod console;
pub mod evaluator;

pub use evaluator::{BoaEvaluator, BoaEvaluatorConfig};

// Re-export boa_engine for hosts that need direct access
pub use boa_engine;
