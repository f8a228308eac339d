//! The JSON request/response protocol at the process boundary.

use serde::{Deserialize, Serialize};
use trustform_domain::{ExtractionSpan, StructuredDocument};

/// A processing request read from stdin
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessRequest {
    /// Full source text of the trust document
    #[serde(default)]
    pub document_text: String,

    /// Credential for the upstream extraction service
    #[serde(default)]
    pub api_key: String,

    /// Optional extraction instructions
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Successful response: the schema-complete document, optionally with
/// the raw engine extractions next to it
#[derive(Debug, Clone, Serialize)]
pub struct SuccessBody {
    /// The assembled, defaulted document (its sections serialize at the
    /// top level of the response)
    #[serde(flatten)]
    pub document: StructuredDocument,

    /// Raw engine output, when requested via the params
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extractions: Option<Vec<ExtractionSpan>>,
}

/// Failure envelope; no partial document ever accompanies it
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Human-readable failure message
    pub error: String,

    /// Failure classification name
    #[serde(rename = "type")]
    pub kind: String,

    /// Diagnostic trace, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// The response printed to stdout, success or failure
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProcessResponse {
    /// Final structured document
    Success(SuccessBody),
    /// Captured failure
    Failure(ErrorBody),
}

impl ProcessResponse {
    /// Build a success response
    pub fn success(document: StructuredDocument, extractions: Option<Vec<ExtractionSpan>>) -> Self {
        ProcessResponse::Success(SuccessBody {
            document,
            extractions,
        })
    }

    /// Build a failure response
    pub fn failure(
        error: impl Into<String>,
        kind: impl Into<String>,
        trace: Option<String>,
    ) -> Self {
        ProcessResponse::Failure(ErrorBody {
            error: error.into(),
            kind: kind.into(),
            trace,
        })
    }
}
