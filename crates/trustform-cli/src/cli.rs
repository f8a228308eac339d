//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Convert a trust document into a schema-complete structured record.
///
/// Reads a JSON request (`{"document_text": ..., "api_key": ...,
/// "instructions": ...}`) from stdin and prints the JSON response to
/// stdout. Failures are serialized into the response, never thrown.
#[derive(Debug, Parser)]
#[command(name = "trustform", version, about)]
pub struct Cli {
    /// Path to the trust template JSON (built-in template if omitted)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Path to the extraction parameters file (.json or .toml)
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Path to the few-shot exemplar corpus JSON
    #[arg(long)]
    pub exemplars: Option<PathBuf>,

    /// Extraction service endpoint
    #[arg(long, env = "TRUSTFORM_ENDPOINT", default_value = "http://localhost:8900")]
    pub endpoint: String,

    /// Pretty-print the JSON response
    #[arg(long)]
    pub pretty: bool,
}
