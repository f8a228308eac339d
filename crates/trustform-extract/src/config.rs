//! Tunable extraction parameters
//!
//! Loaded once at process start from the params artifact (JSON, the
//! native format) or from TOML.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_model_id() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f64 {
    0.1
}

fn default_extraction_passes() -> u32 {
    3
}

fn default_max_workers() -> u32 {
    10
}

fn default_batch_length() -> u32 {
    10
}

fn default_max_char_buffer() -> usize {
    4000
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_enabled() -> bool {
    true
}

fn default_value() -> String {
    "Not specified".to_string()
}

/// Controls the defaulting pass that runs after assembly
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FillMissing {
    /// Whether the defaulting pass runs at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Placeholder written into absent scalar fields
    #[serde(default = "default_value")]
    pub default_value: String,
}

impl Default for FillMissing {
    fn default() -> Self {
        Self {
            enabled: true,
            default_value: default_value(),
        }
    }
}

/// Tunable parameters for the extraction engine and the post-pass.
///
/// Defaults match the shipped params artifact: multiple extraction
/// passes for recall, moderate parallelism for stability, and small
/// character buffers for accuracy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractParams {
    /// Upstream model identifier
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Sampling temperature forwarded to the engine
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Number of extraction passes over the document
    #[serde(default = "default_extraction_passes")]
    pub extraction_passes: u32,

    /// Parallel workers inside the engine
    #[serde(default = "default_max_workers")]
    pub max_workers: u32,

    /// Batch length matched to the worker count
    #[serde(default = "default_batch_length")]
    pub batch_length: u32,

    /// Maximum characters per engine chunk
    #[serde(default = "default_max_char_buffer")]
    pub max_char_buffer: usize,

    /// Timeout for one engine call (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Defaulting pass settings
    #[serde(default)]
    pub fill_missing: FillMissing,

    /// Whether the response carries the raw engine extractions next to
    /// the assembled document
    #[serde(default)]
    pub return_raw_extractions: bool,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            temperature: default_temperature(),
            extraction_passes: default_extraction_passes(),
            max_workers: default_max_workers(),
            batch_length: default_batch_length(),
            max_char_buffer: default_max_char_buffer(),
            timeout_secs: default_timeout_secs(),
            fill_missing: FillMissing::default(),
            return_raw_extractions: false,
        }
    }
}

impl ExtractParams {
    /// Get the engine call timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the parameters
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature {} out of range [0.0, 2.0]", self.temperature));
        }
        if self.extraction_passes == 0 {
            return Err("extraction_passes must be greater than 0".to_string());
        }
        if self.max_workers == 0 {
            return Err("max_workers must be greater than 0".to_string());
        }
        if self.batch_length == 0 {
            return Err("batch_length must be greater than 0".to_string());
        }
        if self.max_char_buffer == 0 {
            return Err("max_char_buffer must be greater than 0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load parameters from JSON (the params artifact format)
    pub fn from_json(json_str: &str) -> Result<Self, String> {
        serde_json::from_str(json_str).map_err(|e| format!("Failed to parse JSON: {}", e))
    }

    /// Load parameters from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize parameters to TOML
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
