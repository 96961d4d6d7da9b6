// Error types for storefront-pom

use thiserror::Error;

/// Result type alias for page-object and driver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the storefront
#[derive(Debug, Error)]
pub enum Error {
    /// Element not found by selector
    ///
    /// Raised when an action needs an element that is not in the document.
    #[error("Element not found: selector '{0}'")]
    ElementNotFound(String),

    /// An action resolved to more than one element
    ///
    /// Actions are strict. Use `Target::first()` or `Target::nth()` to pick
    /// one element out of a repeated structure.
    #[error("Strict mode violation: selector '{selector}' resolved to {count} elements")]
    StrictModeViolation { selector: String, count: usize },

    /// Timeout waiting for a condition
    #[error("Timeout after {timeout_ms}ms waiting for {what}")]
    Timeout { what: String, timeout_ms: u64 },

    /// Assertion timeout (expect API)
    #[error("Assertion timeout: {0}")]
    AssertionTimeout(String),

    /// A page object asked its selector map for a name it does not define
    #[error("Page '{page}' has no selector named '{name}'")]
    UnknownSelector { page: &'static str, name: String },

    /// An armed dialog capture saw no dialog before its timeout
    #[error("No native dialog was raised within {timeout_ms}ms")]
    DialogNotRaised { timeout_ms: u64 },

    /// A dialog capture is already armed on this session
    #[error("A dialog capture is already armed on this session")]
    DialogAlreadyArmed,

    /// Base URL or navigation path could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid suite configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error raised by the Playwright driver
    #[cfg(feature = "playwright")]
    #[error(transparent)]
    Playwright(#[from] playwright_rs::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns true for errors caused by a condition never being met in time
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } | Error::AssertionTimeout(_) | Error::DialogNotRaised { .. } => {
                true
            }
            Error::Context(_, inner) => inner.is_timeout(),
            _ => false,
        }
    }
}
