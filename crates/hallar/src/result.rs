//! Result and error types for Hallar.

use thiserror::Error;

/// Result type for Hallar operations
pub type HallarResult<T> = Result<T, HallarError>;

/// Errors that can occur in the locator engine
#[derive(Debug, Error)]
pub enum HallarError {
    /// Input did not parse into any document structure
    #[error("Input contains no parseable HTML")]
    EmptyInput,

    /// A candidate query could not be constructed
    #[error("Selector construction failed: {message}")]
    Selector {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HallarError {
    /// Create a selector construction error
    #[must_use]
    pub fn selector(message: impl Into<String>) -> Self {
        Self::Selector {
            message: message.into(),
        }
    }
}
