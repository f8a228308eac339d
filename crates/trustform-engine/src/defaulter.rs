//! Defaulting - guarantees schema completeness after assembly

use trustform_domain::{FieldKind, FieldValue, Schema, Section, StructuredDocument};

/// Fill every schema field absent from the document with a
/// kind-appropriate default.
///
/// List fields get an empty list, yes/no fields get `"no"`, open-map
/// fields get an empty map, and all other scalar fields get
/// `default_value`. Fields the assembler already populated are never
/// touched, so the pass is idempotent. After it runs, the document's
/// shape is schema-complete regardless of how many spans were
/// classified.
pub fn fill_defaults(document: &mut StructuredDocument, schema: &Schema, default_value: &str) {
    for section in Section::all() {
        let table = document.section_mut(section);
        for def in schema.section_defs(section) {
            if table.contains(&def.name) {
                continue;
            }
            let value = match def.kind {
                FieldKind::List => FieldValue::List(Vec::new()),
                FieldKind::YesNo => FieldValue::Scalar("no".to_string()),
                FieldKind::OpenMap => FieldValue::Map(Vec::new()),
                FieldKind::Scalar => FieldValue::Scalar(default_value.to_string()),
            };
            table.insert(def.name.clone(), value);
        }
    }
}
