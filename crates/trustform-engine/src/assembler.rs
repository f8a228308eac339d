//! Document assembly - applies the resolver to every span

use crate::resolver::classify;
use tracing::debug;
use trustform_domain::{
    Citation, ExtractionSpan, FieldValue, Instruction, MergeMode, StructuredDocument,
};

/// Assemble the structured document from the engine's span sequence.
///
/// Spans are consumed in input order. Every span yields exactly one
/// citation and exactly one classification outcome; none is ever
/// dropped. The returned document is fresh per call and owns all of its
/// state, so independent requests can assemble concurrently.
pub fn assemble(spans: Vec<ExtractionSpan>) -> StructuredDocument {
    let mut document = StructuredDocument::new();

    for span in spans {
        document.citations.push(Citation {
            key: span.label.clone(),
            text: span.text.clone(),
            location: span.location(),
        });

        let instruction = classify(&span.label, &span.text);
        debug!(
            label = %span.label,
            rule = instruction.rule,
            target = %instruction.path,
            merge = ?instruction.merge,
            "classified span"
        );
        apply(&mut document, &instruction, span);
    }

    document
}

/// Write one span into the document per its merge instruction
fn apply(document: &mut StructuredDocument, instruction: &Instruction, span: ExtractionSpan) {
    let table = document.section_mut(instruction.path.section);
    let field = instruction.path.field;

    match instruction.merge {
        MergeMode::OverwriteScalar => {
            table.insert(field, FieldValue::Scalar(span.text));
        }
        MergeMode::AppendScalar => match table.get_mut(field) {
            Some(FieldValue::Scalar(existing)) => {
                existing.push(' ');
                existing.push_str(&span.text);
            }
            _ => table.insert(field, FieldValue::Scalar(span.text)),
        },
        MergeMode::AppendUniqueList => match table.get_mut(field) {
            Some(FieldValue::List(items)) => {
                if !items.iter().any(|item| *item == span.text) {
                    items.push(span.text);
                }
            }
            _ => table.insert(field, FieldValue::List(vec![span.text])),
        },
        MergeMode::DeriveBoolean => {
            let value = if span.text.is_empty() { "no" } else { "yes" };
            table.insert(field, FieldValue::Scalar(value.to_string()));
        }
        MergeMode::OpenMapInsert => match table.get_mut(field) {
            Some(FieldValue::Map(entries)) => {
                match entries.iter_mut().find(|(key, _)| *key == span.label) {
                    Some(entry) => entry.1 = span.text,
                    None => entries.push((span.label, span.text)),
                }
            }
            _ => table.insert(field, FieldValue::Map(vec![(span.label, span.text)])),
        },
    }
}
