//! Trait definitions for external interactions
//!
//! These traits define the boundary between the deterministic pipeline
//! and the upstream extraction engine. Infrastructure implementations
//! live in `trustform-extract`.

use crate::span::ExtractionSpan;

/// A request forwarded to the extraction engine
#[derive(Debug, Clone, Default)]
pub struct ExtractionRequest {
    /// Full source text of the legal document
    pub document_text: String,

    /// Credential for the upstream service
    pub api_key: String,

    /// Optional extraction instructions to steer the engine
    pub instructions: Option<String>,
}

/// The upstream extraction engine, treated as a black box that turns
/// document text into labeled spans.
///
/// Implemented by the infrastructure layer (`trustform-extract`). The
/// pipeline never inspects how the spans were produced; any failure here
/// is terminal for the request.
pub trait ExtractionEngine {
    /// Error type for engine operations
    type Error;

    /// Extract labeled spans from the document
    fn extract(&self, request: &ExtractionRequest) -> Result<Vec<ExtractionSpan>, Self::Error>;
}
