//! Configuration for the guarded-operation bundle.
//!
//! Every section has sensible defaults; a JSON document only needs to name
//! the fields it overrides.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GuardError;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub eval: EvalConfig,
    pub fetch: FetchConfig,
    pub listeners: ListenerConfig,
}

impl GuardConfig {
    pub fn from_json_str(content: &str) -> Result<Self, GuardError> {
        let config: GuardConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GuardError> {
        let problem = if self.eval.max_code_length == 0 {
            Some("eval.max_code_length must be greater than 0")
        } else if self.fetch.timeout_secs == Some(0) {
            Some("fetch.timeout_secs must be greater than 0 when set")
        } else {
            None
        };

        match problem {
            Some(reason) => {
                tracing::warn!("Rejected configuration: {}", reason);
                Err(GuardError::ConfigError(reason.to_string()))
            }
            None => Ok(()),
        }
    }
}

/// Expression evaluator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Max source length (bytes)
    pub max_code_length: usize,
    /// Max iterations of a single loop; `None` leaves loops unbounded
    pub loop_iteration_limit: Option<u64>,
    /// Route script `console` output to tracing
    pub enable_console: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_code_length: 1_000_000,
            loop_iteration_limit: Some(10_000_000),
            enable_console: true,
        }
    }
}

#[cfg(feature = "builtin-eval-js")]
impl From<&EvalConfig> for xguard_eval_js::BoaEvaluatorConfig {
    fn from(config: &EvalConfig) -> Self {
        Self {
            max_code_length: config.max_code_length,
            loop_iteration_limit: config.loop_iteration_limit,
            enable_console: config.enable_console,
        }
    }
}

/// HTTP client settings for guarded fetches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout_secs: u64,
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 10,
            pool_idle_timeout_secs: 90,
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Global listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Skip the previously installed panic hook once a failure is handled
    pub suppress_default: bool,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            suppress_default: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = GuardConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GuardConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = GuardConfig::from_json_str(
            r#"{ "fetch": { "timeout_secs": 5 }, "listeners": { "suppress_default": false } }"#,
        )
        .unwrap();
        assert_eq!(config.fetch.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.fetch.pool_max_idle_per_host, 10);
        assert!(!config.listeners.suppress_default);
        assert_eq!(config.eval, EvalConfig::default());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = GuardConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, GuardError::ConfigError(_)));
    }

    #[test]
    fn test_zero_code_length_rejected() {
        let err = GuardConfig::from_json_str(r#"{ "eval": { "max_code_length": 0 } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("max_code_length"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = GuardConfig::from_json_str(r#"{ "fetch": { "timeout_secs": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, GuardError::ConfigError(_)));
    }
}
