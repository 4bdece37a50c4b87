use thiserror::Error;

/// Setup-level errors
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("HTTP client error: {0}")]
    HttpClientError(String),
    #[error("No expression evaluator configured")]
    EvaluatorUnavailable,
    #[error("Global listeners are already installed")]
    ListenersAlreadyInstalled,
}

impl From<serde_json::Error> for GuardError {
    fn from(e: serde_json::Error) -> Self {
        GuardError::ConfigError(e.to_string())
    }
}
