//! Trustform Extraction Boundary
//!
//! Infrastructure for the upstream extraction engine: the HTTP client
//! that forwards documents to the remote service, the tunable parameter
//! set, and the exemplar adapter that prepares few-shot guidance.
//!
//! # Architecture
//!
//! This crate implements the `ExtractionEngine` trait from
//! `trustform-domain`. Everything downstream of the span sequence
//! (classification, assembly, defaulting) lives in `trustform-engine`
//! and never sees these types.
//!
//! # Examples
//!
//! ```
//! use trustform_extract::MockExtractor;
//! use trustform_domain::traits::{ExtractionEngine, ExtractionRequest};
//! use trustform_domain::ExtractionSpan;
//!
//! let engine = MockExtractor::new(vec![ExtractionSpan::new("grantor", "Jane Doe")]);
//! let request = ExtractionRequest {
//!     document_text: "any document".to_string(),
//!     api_key: "key".to_string(),
//!     instructions: None,
//! };
//! let spans = engine.extract(&request).unwrap();
//! assert_eq!(spans.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod exemplar;
pub mod remote;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use trustform_domain::traits::{ExtractionEngine, ExtractionRequest};
use trustform_domain::ExtractionSpan;

pub use config::{ExtractParams, FillMissing};
pub use error::ExtractError;
pub use exemplar::{adapt_corpus, extraction_labels_from_schema, Exemplar, ExemplarSpan};
pub use remote::{prewarm_dns, RemoteExtractor};

/// Mock extraction engine for deterministic testing.
///
/// Returns pre-configured span sets without any network calls. Specific
/// documents can be given their own responses or made to fail.
#[derive(Debug, Clone, Default)]
pub struct MockExtractor {
    default_spans: Vec<ExtractionSpan>,
    responses: Arc<Mutex<HashMap<String, Vec<ExtractionSpan>>>>,
    failures: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockExtractor {
    /// Create a mock returning the same spans for every document
    pub fn new(default_spans: Vec<ExtractionSpan>) -> Self {
        Self {
            default_spans,
            responses: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific span set for a given document text
    pub fn add_response(&mut self, document_text: impl Into<String>, spans: Vec<ExtractionSpan>) {
        self.responses
            .lock()
            .unwrap()
            .insert(document_text.into(), spans);
    }

    /// Configure a failure for a given document text
    pub fn add_error(&mut self, document_text: impl Into<String>, message: impl Into<String>) {
        self.failures
            .lock()
            .unwrap()
            .insert(document_text.into(), message.into());
    }

    /// Get the number of times extract was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl ExtractionEngine for MockExtractor {
    type Error = ExtractError;

    fn extract(&self, request: &ExtractionRequest) -> Result<Vec<ExtractionSpan>, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if let Some(message) = self.failures.lock().unwrap().get(&request.document_text) {
            return Err(ExtractError::Communication(message.clone()));
        }
        if let Some(spans) = self.responses.lock().unwrap().get(&request.document_text) {
            return Ok(spans.clone());
        }
        Ok(self.default_spans.clone())
    }
}
