//! The structured document being assembled

use crate::schema::Section;
use crate::span::CharInterval;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// The value held by one document field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A single string (scalar and yes/no fields)
    Scalar(String),
    /// An ordered list of unique strings
    List(Vec<String>),
    /// An insertion-ordered key-to-text bucket (open-map fields)
    Map(Vec<(String, String)>),
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Scalar(s) => serializer.serialize_str(s),
            FieldValue::List(items) => items.serialize(serializer),
            FieldValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// An insertion-ordered field-name to value table.
///
/// Backed by a vector so both field order and open-map entry order
/// survive serialization. Lookups are linear; sections hold at most a
/// few dozen fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    entries: Vec<(String, FieldValue)>,
}

impl FieldTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a field is present
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Look up a field's value
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Mutable lookup of a field's value
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Set a field, replacing any existing value
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.get_mut(&name) {
            Some(existing) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A source-text citation recorded for every input span, independent of
/// how (or whether) the span was mapped into the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    /// The original extraction label
    #[serde(rename = "citation_key")]
    pub key: String,

    /// The full span text
    #[serde(rename = "full_text")]
    pub text: String,

    /// Character interval into the source document
    pub location: CharInterval,
}

/// The assembled output: three sections mirroring the schema plus the
/// citation list, built fresh per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredDocument {
    /// Parties, dates, and identifying facts
    pub basic_information: FieldTable,
    /// Narrative summaries
    pub summary: FieldTable,
    /// Administrative and legal details
    pub details: FieldTable,
    /// One citation per input span, in emission order
    pub citations: Vec<Citation>,
}

impl StructuredDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// The field table for one section
    pub fn section(&self, section: Section) -> &FieldTable {
        match section {
            Section::BasicInformation => &self.basic_information,
            Section::Summary => &self.summary,
            Section::Details => &self.details,
        }
    }

    /// Mutable field table for one section
    pub fn section_mut(&mut self, section: Section) -> &mut FieldTable {
        match section {
            Section::BasicInformation => &mut self.basic_information,
            Section::Summary => &mut self.summary,
            Section::Details => &mut self.details,
        }
    }
}

impl Serialize for StructuredDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut doc = serializer.serialize_struct("StructuredDocument", 4)?;
        doc.serialize_field("Basic_Information", &self.basic_information)?;
        doc.serialize_field("Summary", &self.summary)?;
        doc.serialize_field("Details", &self.details)?;
        doc.serialize_field("citations", &self.citations)?;
        doc.end()
    }
}
