//! Remote extraction engine client
//!
//! The extraction engine itself is an external black box: it receives
//! the document text plus few-shot exemplars and returns labeled spans.
//! This client speaks its HTTP interface and nothing more.
//!
//! # Features
//!
//! - Async HTTP communication with the extraction service
//! - Configurable endpoint and parameters
//! - Retry logic with exponential backoff
//! - Timeout handling
//! - Best-effort DNS pre-warming before the first call

use crate::config::ExtractParams;
use crate::error::ExtractError;
use crate::exemplar::Exemplar;
use serde::{Deserialize, Serialize};
use std::net::ToSocketAddrs;
use std::time::Duration;
use tracing::{debug, info, warn};
use trustform_domain::traits::{ExtractionEngine, ExtractionRequest};
use trustform_domain::ExtractionSpan;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Best-effort DNS pre-resolution of the service host.
///
/// The engine issues parallel requests internally; resolving the host
/// once up front avoids racing resolutions on the first batch. Failures
/// are ignored and left for the real call to surface.
pub fn prewarm_dns(endpoint: &str) {
    let host = endpoint
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .split('/')
        .next()
        .unwrap_or_default();
    if host.is_empty() {
        return;
    }
    let target = if host.contains(':') {
        host.to_string()
    } else {
        format!("{}:443", host)
    };
    match target.to_socket_addrs() {
        Ok(_) => debug!(host, "DNS pre-warm complete"),
        Err(e) => debug!(host, error = %e, "DNS pre-warm failed (ignored)"),
    }
}

/// Wire request to the extraction service
#[derive(Serialize)]
struct ExtractRequestBody<'a> {
    document_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
    model_id: &'a str,
    temperature: f64,
    extraction_passes: u32,
    max_workers: u32,
    batch_length: u32,
    max_char_buffer: usize,
    examples: &'a [Exemplar],
}

/// Wire response from the extraction service
#[derive(Deserialize)]
struct ExtractResponseBody {
    extractions: Vec<ExtractionSpan>,
}

/// HTTP client for the remote extraction engine.
///
/// Holds the few-shot exemplars and tunable parameters; the credential
/// travels with each request.
pub struct RemoteExtractor {
    endpoint: String,
    client: reqwest::Client,
    params: ExtractParams,
    exemplars: Vec<Exemplar>,
    max_retries: u32,
}

impl RemoteExtractor {
    /// Create a new client for the given service endpoint.
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    /// or the parameters fail validation.
    pub fn new(
        endpoint: impl Into<String>,
        params: ExtractParams,
        exemplars: Vec<Exemplar>,
    ) -> Result<Self, ExtractError> {
        params.validate().map_err(ExtractError::Config)?;
        let client = reqwest::Client::builder()
            .timeout(params.timeout())
            .build()
            .map_err(|e| ExtractError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
            params,
            exemplars,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// The configured service endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Extract labeled spans from the document.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the service is unreachable, rejects
    /// the credential, throttles the request, does not know the model,
    /// or returns a malformed body. Communication failures and
    /// throttling are retried with exponential backoff.
    pub async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<Vec<ExtractionSpan>, ExtractError> {
        let url = format!("{}/v1/extract", self.endpoint);
        let body = ExtractRequestBody {
            document_text: &request.document_text,
            instructions: request.instructions.as_deref(),
            model_id: &self.params.model_id,
            temperature: self.params.temperature,
            extraction_passes: self.params.extraction_passes,
            max_workers: self.params.max_workers,
            batch_length: self.params.batch_length,
            max_char_buffer: self.params.max_char_buffer,
            examples: &self.exemplars,
        };

        info!(
            model = %self.params.model_id,
            document_chars = request.document_text.chars().count(),
            exemplars = self.exemplars.len(),
            "calling extraction engine"
        );

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .header("x-goog-api-key", &request.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed: ExtractResponseBody =
                            response.json().await.map_err(|e| {
                                ExtractError::InvalidResponse(format!(
                                    "Failed to parse response: {}",
                                    e
                                ))
                            })?;
                        debug!(spans = parsed.extractions.len(), "extraction complete");
                        return Ok(parsed.extractions);
                    } else if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                    {
                        return Err(ExtractError::Auth(format!("HTTP {}", status)));
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(ExtractError::ModelNotAvailable(
                            self.params.model_id.clone(),
                        ));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(ExtractError::RateLimitExceeded);
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(ExtractError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) if e.is_timeout() => {
                    last_error = Some(ExtractError::Timeout);
                }
                Err(e) => {
                    last_error = Some(ExtractError::Communication(format!(
                        "Request failed: {}",
                        e
                    )));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(attempt = attempts, delay_secs = delay.as_secs(), "retrying extraction");
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| ExtractError::Communication("Max retries exceeded".to_string())))
    }
}

impl ExtractionEngine for RemoteExtractor {
    type Error = ExtractError;

    fn extract(&self, request: &ExtractionRequest) -> Result<Vec<ExtractionSpan>, Self::Error> {
        // Blocking wrapper for the async client
        tokio::runtime::Runtime::new()
            .map_err(|e| ExtractError::Config(format!("Runtime: {}", e)))?
            .block_on(async { self.extract(request).await })
    }
}
