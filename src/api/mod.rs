//! Bundled entry point for hosts that want one value to pass around.

mod guards;

pub use guards::{Guards, GuardsBuilder};
