//! Error types for the CLI application.

use thiserror::Error;
use trustform_extract::ExtractError;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
///
/// These never propagate past the process boundary; `main` serializes
/// them into the error envelope using `kind()` as the classification.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request JSON could not be parsed
    #[error("Request parse error: {0}")]
    RequestParse(serde_json::Error),

    /// Template artifact error
    #[error("Template error: {0}")]
    Template(#[from] trustform_domain::SchemaError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extraction boundary error
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl CliError {
    /// Stable classification name for the error envelope
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Io(_) => "IoError",
            CliError::RequestParse(_) => "RequestParseError",
            CliError::Template(_) => "TemplateError",
            CliError::Config(_) => "ConfigError",
            CliError::Extract(e) => e.kind(),
        }
    }
}
