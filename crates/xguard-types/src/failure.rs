use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a failed operation.
///
/// The first six mirror the failure categories a scripting host raises; the
/// remaining ones are synthesized by guarded operations themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Syntax,
    Type,
    Reference,
    Range,
    Uri,
    /// A lookup produced nothing (synthesized).
    NotFound,
    /// A response arrived with a non-success status (synthesized).
    HttpStatus,
    Other,
}

impl FailureKind {
    /// Constructor-style name, as a script host would report it.
    pub fn name(&self) -> &'static str {
        match self {
            FailureKind::Syntax => "SyntaxError",
            FailureKind::Type => "TypeError",
            FailureKind::Reference => "ReferenceError",
            FailureKind::Range => "RangeError",
            FailureKind::Uri => "URIError",
            FailureKind::NotFound => "NotFoundError",
            FailureKind::HttpStatus => "HttpError",
            FailureKind::Other => "Error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed operation: its kind, message and optional diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    /// Where the failure originated, when the producer knows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
    /// The input that caused the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

/// Convenience alias for fallible primitives.
pub type FailureResult<T> = Result<T, Failure>;

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            trace: None,
            input: None,
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Syntax, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Type, message)
    }

    pub fn reference(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Reference, message)
    }

    pub fn range(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Range, message)
    }

    pub fn uri(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Uri, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NotFound, message)
    }

    pub fn http_status(status: u16) -> Self {
        Self::new(
            FailureKind::HttpStatus,
            format!("HTTP error! status: {}", status),
        )
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Other, message)
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn is(&self, kind: FailureKind) -> bool {
        self.kind == kind
    }
}

impl From<serde_json::Error> for Failure {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let kind = match e.classify() {
            Category::Syntax | Category::Eof => FailureKind::Syntax,
            Category::Data => FailureKind::Type,
            Category::Io => FailureKind::Other,
        };
        Failure::new(kind, e.to_string())
    }
}
