//! # xguard: guarded wrappers around fallible operations
//!
//! `xguard` wraps common runtime failure modes in small, stateless guards.
//! Each guard attempts one risky operation, classifies a failure by
//! [`FailureKind`], logs a diagnostic through `tracing` and returns a safe
//! fallback when the failure is of the kind it was built to absorb. Failures
//! of any other kind are handed back unchanged.
//!
//! - **Evaluation**: [`check_syntax`], [`safe_eval`], [`debug_code`] over a
//!   pluggable [`ExpressionEvaluator`] (Boa JavaScript by default).
//! - **Calls**: [`handle_type_error`], [`handle_range_error`].
//! - **Lookup**: [`safe_access`] for dot-paths, [`safe_query_selector`] for
//!   elements in a [`Document`].
//! - **Decoding**: [`safe_decode_uri`], [`safe_json_parse`].
//! - **Network**: [`safe_fetch`] over a pooled [`Fetcher`].
//! - **Listeners**: [`install_global_listeners`] for panics and unobserved
//!   task failures.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use xguard::Guards;
//!
//! let guards = Guards::builder().build().unwrap();
//! let user = json!({ "user": { "name": "John" } });
//! assert_eq!(guards.safe_access(&user, "user.name", None), json!("John"));
//! assert_eq!(guards.safe_json_parse("{bad", None), json!({}));
//! println!("{}", guards.check_syntax("function test() { console.log('Hello'); }"));
//! ```
//!
//! # Feature Flags
//!
//! | Flag | Description |
//! |------|-------------|
//! | `builtin-eval-js` | Bundles the Boa-backed evaluator used by [`Guards::builder`] (default) |

pub mod api;
pub mod config;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod guard;
pub mod listeners;
#[cfg(test)]
pub(crate) mod testing;

pub use crate::api::{Guards, GuardsBuilder};
pub use crate::config::{EvalConfig, FetchConfig, GuardConfig, ListenerConfig};
pub use crate::dom::{Document, ElementQuery, NodeId};
pub use crate::error::{GuardError, GuardResult};
pub use crate::fetch::{Fetcher, HttpMethod, RequestOptions};
pub use crate::guard::{
    check_syntax, debug_code, decode_uri, handle_range_error, handle_type_error, safe_access,
    safe_decode_uri, safe_eval, safe_fetch, safe_json_parse, safe_json_parse_as,
    safe_query_selector,
};
pub use crate::listeners::{
    install_global_listeners, listeners_installed, report_uncaught, report_unhandled_rejection,
    spawn_observed, ListenerGuard, ListenerStats, Observed, UncaughtFailure,
};
pub use xguard_types::{ExpressionEvaluator, Failure, FailureKind, FailureResult};

#[cfg(feature = "builtin-eval-js")]
pub use xguard_eval_js::{BoaEvaluator, BoaEvaluatorConfig};

/// The bundle and failure model in one import.
pub mod prelude {
    pub use crate::api::Guards;
    pub use crate::dom::{Document, NodeId};
    pub use crate::fetch::RequestOptions;
    pub use xguard_types::{ExpressionEvaluator, Failure, FailureKind};
}
