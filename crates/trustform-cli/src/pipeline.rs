//! Request orchestration: validate, extract, assemble, default.

use crate::protocol::{ProcessRequest, ProcessResponse};
use tracing::{info, warn};
use trustform_domain::traits::{ExtractionEngine, ExtractionRequest};
use trustform_domain::Schema;
use trustform_engine::{assemble, fill_defaults};
use trustform_extract::{ExtractError, ExtractParams};

/// Process one request end to end.
///
/// Validation failures short-circuit before the engine is invoked.
/// Engine failures are terminal and atomic: the whole request fails and
/// no partial document is returned. The classification/assembly/
/// defaulting stages cannot fail.
pub fn process<E>(
    engine: &E,
    schema: &Schema,
    params: &ExtractParams,
    request: &ProcessRequest,
) -> ProcessResponse
where
    E: ExtractionEngine<Error = ExtractError>,
{
    if request.api_key.is_empty() {
        return ProcessResponse::failure("No API key provided", "ValidationError", None);
    }
    if request.document_text.is_empty() {
        return ProcessResponse::failure("No document text provided", "ValidationError", None);
    }

    let extraction_request = ExtractionRequest {
        document_text: request.document_text.clone(),
        api_key: request.api_key.clone(),
        instructions: request.instructions.clone(),
    };

    let spans = match engine.extract(&extraction_request) {
        Ok(spans) => spans,
        Err(e) => {
            warn!(kind = e.kind(), error = %e, "extraction failed");
            let trace = error_trace(&e);
            return ProcessResponse::failure(e.to_string(), e.kind(), Some(trace));
        }
    };

    info!(spans = spans.len(), "assembling document");

    let raw = params.return_raw_extractions.then(|| spans.clone());
    let mut document = assemble(spans);
    if params.fill_missing.enabled {
        fill_defaults(&mut document, schema, &params.fill_missing.default_value);
    }

    ProcessResponse::success(document, raw)
}

/// Render an error and its source chain as a diagnostic trace
fn error_trace(error: &ExtractError) -> String {
    let mut trace = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        trace.push_str("\ncaused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }
    trace
}
