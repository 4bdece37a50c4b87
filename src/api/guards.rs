//! The guarded-operation bundle.
//!
//! [`Guards`] (constructed via [`GuardsBuilder`]) binds every guarded
//! operation to one expression evaluator and one HTTP client so callers can
//! pass a single value around instead of the individual capabilities.

use std::sync::Arc;

use serde_json::Value;

use xguard_types::{ExpressionEvaluator, Failure};

use crate::config::GuardConfig;
use crate::dom::{ElementQuery, NodeId};
use crate::error::GuardError;
use crate::fetch::{Fetcher, RequestOptions};
use crate::guard;

/// All ten guarded operations behind one value.
#[derive(Clone)]
pub struct Guards {
    evaluator: Arc<dyn ExpressionEvaluator>,
    fetcher: Fetcher,
}

impl Guards {
    /// Create a new builder with default configuration.
    pub fn builder() -> GuardsBuilder {
        GuardsBuilder {
            config: GuardConfig::default(),
            evaluator: None,
            fetcher: None,
        }
    }

    pub fn evaluator(&self) -> &dyn ExpressionEvaluator {
        self.evaluator.as_ref()
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// See [`guard::check_syntax`].
    pub fn check_syntax(&self, code: &str) -> String {
        guard::check_syntax(self.evaluator(), code)
    }

    /// See [`guard::handle_type_error`].
    pub fn handle_type_error<T, F>(&self, f: F) -> Result<Option<T>, Failure>
    where
        F: FnOnce() -> Result<T, Failure>,
    {
        guard::handle_type_error(f)
    }

    /// See [`guard::safe_access`].
    pub fn safe_access(&self, root: &Value, path: &str, default: Option<Value>) -> Value {
        guard::safe_access(root, path, default)
    }

    /// See [`guard::handle_range_error`].
    pub fn handle_range_error<T, F>(&self, f: F) -> Result<Option<T>, Failure>
    where
        F: FnOnce() -> Result<T, Failure>,
    {
        guard::handle_range_error(f)
    }

    /// See [`guard::safe_decode_uri`].
    pub fn safe_decode_uri(&self, uri: &str) -> String {
        guard::safe_decode_uri(uri)
    }

    /// See [`guard::safe_eval`].
    pub fn safe_eval(&self, code: &str) -> Option<Value> {
        guard::safe_eval(self.evaluator(), code)
    }

    /// See [`guard::safe_query_selector`].
    pub fn safe_query_selector<Q>(
        &self,
        selector: &str,
        document: &Q,
        scope: Option<NodeId>,
    ) -> Option<NodeId>
    where
        Q: ElementQuery + ?Sized,
    {
        guard::safe_query_selector(selector, document, scope)
    }

    /// See [`guard::safe_fetch`].
    pub async fn safe_fetch(&self, url: &str, options: &RequestOptions) -> Option<Value> {
        guard::safe_fetch(&self.fetcher, url, options).await
    }

    /// See [`guard::safe_json_parse`].
    pub fn safe_json_parse(&self, text: &str, default: Option<Value>) -> Value {
        guard::safe_json_parse(text, default)
    }

    /// See [`guard::debug_code`].
    pub fn debug_code(&self, code: &str) -> Option<Value> {
        guard::debug_code(self.evaluator(), code)
    }
}

/// Builder for [`Guards`].
pub struct GuardsBuilder {
    config: GuardConfig,
    evaluator: Option<Arc<dyn ExpressionEvaluator>>,
    fetcher: Option<Fetcher>,
}

impl GuardsBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a host-supplied evaluator instead of the built-in one.
    pub fn evaluator(mut self, evaluator: Arc<dyn ExpressionEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Use an existing HTTP client instead of building one from config.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.fetcher = Some(Fetcher::from_client(client));
        self
    }

    pub fn build(self) -> Result<Guards, GuardError> {
        self.config.validate()?;

        let evaluator = match self.evaluator {
            Some(evaluator) => evaluator,
            None => default_evaluator(&self.config)?,
        };
        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Fetcher::new(&self.config.fetch)?,
        };

        Ok(Guards { evaluator, fetcher })
    }
}

#[cfg(feature = "builtin-eval-js")]
fn default_evaluator(config: &GuardConfig) -> Result<Arc<dyn ExpressionEvaluator>, GuardError> {
    Ok(Arc::new(xguard_eval_js::BoaEvaluator::new((&config.eval).into())))
}

#[cfg(not(feature = "builtin-eval-js"))]
fn default_evaluator(_config: &GuardConfig) -> Result<Arc<dyn ExpressionEvaluator>, GuardError> {
    Err(GuardError::EvaluatorUnavailable)
}
