//! Error types for `hallar-codegen`.

use thiserror::Error;

/// Result type alias for emitter operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur while emitting code.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Class name that would not be a legal identifier in the target language
    #[error("Invalid class name '{name}': {reason}")]
    InvalidClassName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodegenError {
    /// Build an [`CodegenError::InvalidClassName`].
    pub fn invalid_class_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidClassName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_name_and_reason() {
        let err = CodegenError::invalid_class_name("1Page", "must not start with a digit");
        assert_eq!(
            err.to_string(),
            "Invalid class name '1Page': must not start with a digit"
        );
    }
}
