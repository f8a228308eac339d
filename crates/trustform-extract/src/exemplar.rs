//! Exemplar adapter - turns the worked-example corpus into span-labeled
//! few-shot exemplars for the extraction engine
//!
//! The corpus is a JSON array of worked items, each carrying an `Input`
//! document excerpt and an `Output` of extracted fields. Outputs are
//! decomposed into (field, value) pairs and re-encoded as spans tagged
//! with a label derived from the field name; list-valued fields explode
//! into one span per element. The literal sentinel `"N/A"` marks an
//! absent value and is excluded.

use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trustform_domain::schema::fields;
use trustform_domain::{Schema, Section};

/// The literal sentinel the corpus uses for an absent value
pub const NOT_APPLICABLE: &str = "N/A";

/// One labeled span inside an exemplar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemplarSpan {
    /// Extraction label derived from the output field name
    #[serde(rename = "extraction_class")]
    pub label: String,

    /// Value text
    #[serde(rename = "extraction_text")]
    pub text: String,
}

/// One few-shot exemplar: an input excerpt plus its expected spans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exemplar {
    /// Document excerpt the spans were extracted from
    pub text: String,

    /// Expected spans, in output-field order
    #[serde(rename = "extractions")]
    pub spans: Vec<ExemplarSpan>,
}

/// Convert the worked-example corpus into engine exemplars.
///
/// Items missing `Input` or `Output`, and items whose output decomposes
/// to zero spans, are skipped.
pub fn adapt_corpus(corpus_json: &str) -> Result<Vec<Exemplar>, ExtractError> {
    let corpus: Value = serde_json::from_str(corpus_json)?;
    let items = corpus
        .as_array()
        .ok_or_else(|| ExtractError::InvalidResponse("corpus is not a JSON array".to_string()))?;

    let mut exemplars = Vec::new();
    for item in items {
        let (Some(input), Some(output)) = (
            item.get("Input").and_then(Value::as_str),
            item.get("Output"),
        ) else {
            continue;
        };

        let spans = if let Some(data) = output.get("Final Extracted Data") {
            spans_from_data(data)
        } else {
            spans_from_summary(output, item.get("Instruction").and_then(Value::as_str))
        };

        if !spans.is_empty() {
            exemplars.push(Exemplar {
                text: input.to_string(),
                spans,
            });
        }
    }
    Ok(exemplars)
}

/// Decompose a "Final Extracted Data" object into spans
fn spans_from_data(data: &Value) -> Vec<ExemplarSpan> {
    let Some(object) = data.as_object() else {
        return Vec::new();
    };
    let mut spans = Vec::new();
    for (field, value) in object {
        let label = label_from_field(field);
        match value {
            Value::Array(elements) => {
                for element in elements {
                    push_span(&mut spans, &label, element);
                }
            }
            other => push_span(&mut spans, &label, other),
        }
    }
    spans
}

/// Handle the summary-shaped outputs ("Final Extracted Trust Name" /
/// "Final Extracted Summary")
fn spans_from_summary(output: &Value, instruction: Option<&str>) -> Vec<ExemplarSpan> {
    let mut spans = Vec::new();

    if let Some(name) = output.get("Final Extracted Trust Name").and_then(Value::as_str) {
        spans.push(ExemplarSpan {
            label: "trust_name".to_string(),
            text: name.to_string(),
        });
    }

    match output.get("Final Extracted Summary") {
        Some(Value::Object(summary)) => {
            for (field, value) in summary {
                push_span(&mut spans, &label_from_field(field), value);
            }
        }
        Some(Value::String(summary)) => {
            // Whole-string summaries take their label from the item's
            // instruction text.
            let instruction = instruction.unwrap_or("").to_lowercase();
            let label = if instruction.contains("distribution")
                || instruction.contains("current benefits")
            {
                "distribution_provisions"
            } else {
                "summary"
            };
            spans.push(ExemplarSpan {
                label: label.to_string(),
                text: summary.clone(),
            });
        }
        _ => {}
    }

    spans
}

fn push_span(spans: &mut Vec<ExemplarSpan>, label: &str, value: &Value) {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return,
    };
    if text.is_empty() || text == NOT_APPLICABLE {
        return;
    }
    spans.push(ExemplarSpan {
        label: label.to_string(),
        text,
    });
}

/// Derive an extraction label from an output field name
fn label_from_field(field: &str) -> String {
    field.replace(' ', "_").to_lowercase()
}

/// Derive the engine's label vocabulary from the template schema.
///
/// Field names become extraction labels: lower-cased, `(s)` suffixes
/// stripped, spaces and hyphens turned into underscores. The free-form
/// `Other_Provisions` bucket has no label of its own.
pub fn extraction_labels_from_schema(schema: &Schema) -> Vec<String> {
    let mut labels = Vec::new();
    for def in schema.section_defs(Section::BasicInformation) {
        labels.push(def.name.replace("(s)", "").replace(' ', "_").to_lowercase());
    }
    for def in schema.section_defs(Section::Summary) {
        labels.push(def.name.replace(' ', "_").to_lowercase());
    }
    for def in schema.section_defs(Section::Details) {
        if def.name == fields::OTHER_PROVISIONS {
            continue;
        }
        labels.push(
            def.name
                .replace(' ', "_")
                .replace('-', "_")
                .to_lowercase(),
        );
    }
    labels
}
