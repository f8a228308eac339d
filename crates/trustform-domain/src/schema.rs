//! Template schema - the declared shape of the output document

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Well-known schema field names.
///
/// The label resolver targets these by name; keeping them as constants
/// ties the rule table, the default template, and the tests to a single
/// source of truth.
pub mod fields {
    #![allow(missing_docs)]

    // Basic_Information
    pub const TRUST_NAME: &str = "Trust_Name";
    pub const TRUST_TYPE: &str = "Trust_Type";
    pub const EFFECTIVE_DATE: &str = "Effective_Date";
    pub const GRANTORS: &str = "Grantor(s)";
    pub const TRUSTEES: &str = "Trustee(s)";
    pub const SUCCESSOR_TRUSTEES: &str = "Successor_Trustee(s)";
    pub const PRIMARY_BENEFICIARIES: &str = "Primary_Beneficiaries";
    pub const CONTINGENT_BENEFICIARIES: &str = "Contingent_Beneficiaries";

    // Summary
    pub const PURPOSE_AND_INTENT: &str = "Purpose_and_Intent";
    pub const HOW_THE_TRUST_WORKS: &str = "How_the_Trust_Works";
    pub const DISTRIBUTION_PROVISIONS: &str = "Distribution_Provisions";
    pub const TRUSTEE_POWERS_AND_DUTIES: &str = "Trustee_Powers_and_Duties";
    pub const AMENDMENT_AND_TERMINATION: &str = "Amendment_and_Termination";
    pub const SPECIAL_PROVISIONS: &str = "Special_Provisions";
    pub const OTHER_SUMMARY_PROVISIONS: &str = "Other_Summary_Provisions";

    // Details
    pub const TRUST_TAX_ID: &str = "Trust_Tax_ID/EIN";
    pub const STATE_OF_FORMATION: &str = "State_of_Formation";
    pub const TRUST_PROTECTOR: &str = "Trust_Protector";
    pub const INVESTMENT_ADVISOR: &str = "Investment_Advisor";
    pub const DISTRIBUTION_ADVISOR: &str = "Distribution_Advisor";
    pub const GST_TAX_PLANNING: &str = "GST_Tax_Planning";
    pub const MARITAL_DEDUCTION: &str = "Marital_Deduction";
    pub const LAW_FIRM: &str = "Law_Firm";
    pub const TRUST_SITUS: &str = "Trust_Situs";
    pub const SPENDTHRIFT_PROVISION: &str = "Spendthrift_Provision";
    pub const NO_CONTEST_CLAUSE: &str = "No-Contest_Clause";
    pub const OTHER_PROVISIONS: &str = "Other_Provisions";
}

/// The three top-level sections of the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Parties, dates, and identifying facts
    BasicInformation,
    /// Narrative summaries of how the trust operates
    Summary,
    /// Administrative and legal details
    Details,
}

impl Section {
    /// The section's name as it appears in the template and the output
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::BasicInformation => "Basic_Information",
            Section::Summary => "Summary",
            Section::Details => "Details",
        }
    }

    /// All sections, in output order
    pub fn all() -> [Section; 3] {
        [Section::BasicInformation, Section::Summary, Section::Details]
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of value a schema field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single string (repeated writes overwrite or concatenate
    /// depending on the merge mode)
    Scalar,
    /// An ordered list of unique strings
    List,
    /// A "yes"/"no" flag derived from span presence
    YesNo,
    /// A free-form key-to-text bucket keyed by the original label
    OpenMap,
}

/// One declared field: name plus kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name exactly as it appears in the output
    pub name: String,
    /// Kind of value the field holds
    pub kind: FieldKind,
}

impl FieldDef {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// Errors raised while loading a template
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Template JSON could not be parsed
    #[error("Template parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A declared section is not a JSON object
    #[error("Section '{0}' is not an object")]
    BadSection(String),
}

/// The template schema: three ordered sections of field definitions.
///
/// Loaded once at process start and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    basic_information: Vec<FieldDef>,
    summary: Vec<FieldDef>,
    details: Vec<FieldDef>,
}

impl Schema {
    /// Parse a schema from template JSON text.
    ///
    /// The template maps each field name to a marker value: an array
    /// declares a list field, the string `"yes_no"` declares a yes/no
    /// field, an object declares an open-map bucket, and any other value
    /// (typically a descriptive string) declares a scalar.
    pub fn from_template(template_json: &str) -> Result<Self, SchemaError> {
        let template: Value = serde_json::from_str(template_json)?;
        let mut schema = Self {
            basic_information: Vec::new(),
            summary: Vec::new(),
            details: Vec::new(),
        };
        for section in Section::all() {
            let Some(declared) = template.get(section.as_str()) else {
                continue;
            };
            let object = declared
                .as_object()
                .ok_or_else(|| SchemaError::BadSection(section.as_str().to_string()))?;
            for (name, marker) in object {
                schema
                    .section_defs_mut(section)
                    .push(FieldDef::new(name, Self::kind_of(marker)));
            }
        }
        Ok(schema)
    }

    fn kind_of(marker: &Value) -> FieldKind {
        match marker {
            Value::Array(_) => FieldKind::List,
            Value::Object(_) => FieldKind::OpenMap,
            Value::String(s) if s == "yes_no" => FieldKind::YesNo,
            _ => FieldKind::Scalar,
        }
    }

    /// The built-in trust template, matching the shipped artifact.
    pub fn trust_default() -> Self {
        use FieldKind::{List, OpenMap, Scalar, YesNo};
        Self {
            basic_information: vec![
                FieldDef::new(fields::TRUST_NAME, Scalar),
                FieldDef::new(fields::TRUST_TYPE, Scalar),
                FieldDef::new(fields::EFFECTIVE_DATE, Scalar),
                FieldDef::new(fields::GRANTORS, List),
                FieldDef::new(fields::TRUSTEES, List),
                FieldDef::new(fields::SUCCESSOR_TRUSTEES, List),
                FieldDef::new(fields::PRIMARY_BENEFICIARIES, List),
                FieldDef::new(fields::CONTINGENT_BENEFICIARIES, List),
            ],
            summary: vec![
                FieldDef::new(fields::PURPOSE_AND_INTENT, Scalar),
                FieldDef::new(fields::HOW_THE_TRUST_WORKS, Scalar),
                FieldDef::new(fields::DISTRIBUTION_PROVISIONS, Scalar),
                FieldDef::new(fields::TRUSTEE_POWERS_AND_DUTIES, Scalar),
                FieldDef::new(fields::AMENDMENT_AND_TERMINATION, Scalar),
                FieldDef::new(fields::SPECIAL_PROVISIONS, Scalar),
                FieldDef::new(fields::OTHER_SUMMARY_PROVISIONS, OpenMap),
            ],
            details: vec![
                FieldDef::new(fields::TRUST_TAX_ID, Scalar),
                FieldDef::new(fields::STATE_OF_FORMATION, Scalar),
                FieldDef::new(fields::TRUST_PROTECTOR, Scalar),
                FieldDef::new(fields::INVESTMENT_ADVISOR, Scalar),
                FieldDef::new(fields::DISTRIBUTION_ADVISOR, Scalar),
                FieldDef::new(fields::GST_TAX_PLANNING, Scalar),
                FieldDef::new(fields::MARITAL_DEDUCTION, Scalar),
                FieldDef::new(fields::LAW_FIRM, Scalar),
                FieldDef::new(fields::TRUST_SITUS, Scalar),
                FieldDef::new(fields::SPENDTHRIFT_PROVISION, YesNo),
                FieldDef::new(fields::NO_CONTEST_CLAUSE, YesNo),
                FieldDef::new(fields::OTHER_PROVISIONS, OpenMap),
            ],
        }
    }

    /// Field definitions for one section, in declaration order
    pub fn section_defs(&self, section: Section) -> &[FieldDef] {
        match section {
            Section::BasicInformation => &self.basic_information,
            Section::Summary => &self.summary,
            Section::Details => &self.details,
        }
    }

    fn section_defs_mut(&mut self, section: Section) -> &mut Vec<FieldDef> {
        match section {
            Section::BasicInformation => &mut self.basic_information,
            Section::Summary => &mut self.summary,
            Section::Details => &mut self.details,
        }
    }

    /// Total number of declared fields across all sections
    pub fn field_count(&self) -> usize {
        Section::all()
            .iter()
            .map(|s| self.section_defs(*s).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trust_default_shape() {
        let schema = Schema::trust_default();
        assert_eq!(schema.section_defs(Section::BasicInformation).len(), 8);
        assert_eq!(schema.section_defs(Section::Summary).len(), 7);
        assert_eq!(schema.section_defs(Section::Details).len(), 12);
    }

    #[test]
    fn test_from_template_kinds() {
        let template = r#"{
            "Basic_Information": {
                "Trust_Name": "Name of the trust",
                "Grantor(s)": []
            },
            "Details": {
                "Spendthrift_Provision": "yes_no",
                "Other_Provisions": {}
            }
        }"#;
        let schema = Schema::from_template(template).unwrap();
        let basic = schema.section_defs(Section::BasicInformation);
        assert_eq!(basic[0].kind, FieldKind::Scalar);
        assert_eq!(basic[1].kind, FieldKind::List);
        let details = schema.section_defs(Section::Details);
        assert_eq!(details[0].kind, FieldKind::YesNo);
        assert_eq!(details[1].kind, FieldKind::OpenMap);
        assert!(schema.section_defs(Section::Summary).is_empty());
    }

    #[test]
    fn test_from_template_keeps_declaration_order() {
        // Field order in the output follows the template, not the
        // alphabet; needs serde_json's preserve_order feature.
        let template = r#"{
            "Summary": {
                "Zeta_Provision": "last in the alphabet, first declared",
                "Alpha_Provision": "first in the alphabet, last declared"
            }
        }"#;
        let schema = Schema::from_template(template).unwrap();
        let names: Vec<&str> = schema
            .section_defs(Section::Summary)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zeta_Provision", "Alpha_Provision"]);
    }

    #[test]
    fn test_from_template_rejects_non_object_section() {
        let template = r#"{"Summary": ["not", "an", "object"]}"#;
        assert!(matches!(
            Schema::from_template(template),
            Err(SchemaError::BadSection(_))
        ));
    }

    #[test]
    fn test_from_template_invalid_json() {
        assert!(matches!(
            Schema::from_template("not json"),
            Err(SchemaError::Parse(_))
        ));
    }
}
