//! Error types for the extraction boundary

use thiserror::Error;

/// Errors raised at the extraction engine boundary.
///
/// Every failure here is terminal for the request; the process boundary
/// serializes it into the error envelope, carrying `kind()` as the
/// failure classification name.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Credential rejected by the upstream service
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Upstream quota or rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Requested model not available upstream
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Malformed engine output
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Extraction call timed out
    #[error("Extraction timeout")]
    Timeout,

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractError {
    /// Stable classification name for the error envelope
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::Communication(_) => "CommunicationError",
            ExtractError::Auth(_) => "AuthenticationError",
            ExtractError::RateLimitExceeded => "RateLimitError",
            ExtractError::ModelNotAvailable(_) => "ModelNotAvailableError",
            ExtractError::InvalidResponse(_) => "InvalidResponseError",
            ExtractError::Timeout => "TimeoutError",
            ExtractError::JsonParse(_) => "JsonParseError",
            ExtractError::Config(_) => "ConfigError",
        }
    }
}
