//! Extraction spans - the input unit produced by the extraction engine

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A half-open character range `[start, end)` into the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharInterval {
    /// Offset of the first character of the span
    pub start: usize,

    /// Offset one past the last character of the span
    pub end: usize,
}

impl CharInterval {
    /// Create a new interval
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One labeled fact detected in the source document.
///
/// Spans are produced by the external extraction engine and consumed
/// exactly once during assembly. The label is free-form and noisy; the
/// label resolver is responsible for mapping it onto the schema.
///
/// # Wire format
///
/// Spans arrive from the engine as
/// `{"extraction_class": ..., "extraction_text": ..., "char_start": ...,
/// "char_end": ..., "attributes": {...}}` where the offsets and the
/// attribute map are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSpan {
    /// Classification tag attached by the extraction engine (free-form)
    #[serde(rename = "extraction_class")]
    pub label: String,

    /// Exact text of the span
    #[serde(rename = "extraction_text")]
    pub text: String,

    /// Start offset into the source document, when the engine reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_start: Option<usize>,

    /// End offset (exclusive) into the source document, when the engine
    /// reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_end: Option<usize>,

    /// Engine-reported attributes (free-form key/value pairs)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

impl ExtractionSpan {
    /// Create a span without interval metadata or attributes
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            char_start: None,
            char_end: None,
            attributes: HashMap::new(),
        }
    }

    /// Attach a character interval
    pub fn with_interval(mut self, start: usize, end: usize) -> Self {
        self.char_start = Some(start);
        self.char_end = Some(end);
        self
    }

    /// The location of this span in the source document.
    ///
    /// A missing start offset defaults to zero; a missing end offset
    /// defaults to the character length of the span text.
    pub fn location(&self) -> CharInterval {
        CharInterval::new(
            self.char_start.unwrap_or(0),
            self.char_end.unwrap_or_else(|| self.text.chars().count()),
        )
    }
}
