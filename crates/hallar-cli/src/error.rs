//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine error
    #[error("Analysis failed: {0}")]
    Hallar(#[from] hallar::HallarError),

    /// Emission error
    #[error("Code generation failed: {0}")]
    Codegen(#[from] hallar_codegen::CodegenError),
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display() {
        let err = CliError::invalid_argument("provide --input or --stdin");
        assert_eq!(
            err.to_string(),
            "Invalid argument: provide --input or --stdin"
        );
    }

    #[test]
    fn engine_errors_convert() {
        let err: CliError = hallar::HallarError::EmptyInput.into();
        assert!(err.to_string().starts_with("Analysis failed:"));
    }
}
