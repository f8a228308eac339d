//! Pipeline-level tests covering classification, assembly, and defaulting

use crate::{assemble, classify, fill_defaults};
use trustform_domain::schema::fields;
use trustform_domain::{
    ExtractionSpan, FieldValue, MergeMode, Schema, Section, StructuredDocument,
};

fn scalar(s: &str) -> FieldValue {
    FieldValue::Scalar(s.to_string())
}

fn list(items: &[&str]) -> FieldValue {
    FieldValue::List(items.iter().map(|s| s.to_string()).collect())
}

// --- classification ---

#[test]
fn test_every_label_classifies() {
    let labels = [
        "trust_name",
        "Grantor",
        "successor trustee",
        "lifetime-beneficiary",
        "spendthrift_clause",
        "distribution_advisor",
        "",
        "🦀",
        "completely unrecognized label 42",
    ];
    for label in labels {
        // classify is total; reaching here without a panic is the point
        let instruction = classify(label, "some text");
        assert!(!instruction.rule.is_empty());
    }
}

#[test]
fn test_exact_concept_scalars() {
    let cases = [
        ("Trust_Name", Section::BasicInformation, fields::TRUST_NAME),
        ("trust type", Section::BasicInformation, fields::TRUST_TYPE),
        ("effective-date", Section::BasicInformation, fields::EFFECTIVE_DATE),
        ("trust_date", Section::BasicInformation, fields::EFFECTIVE_DATE),
        ("tax_id", Section::Details, fields::TRUST_TAX_ID),
        ("EIN", Section::Details, fields::TRUST_TAX_ID),
        ("state_of_formation", Section::Details, fields::STATE_OF_FORMATION),
        ("governing_law", Section::Details, fields::STATE_OF_FORMATION),
        ("trust_protector", Section::Details, fields::TRUST_PROTECTOR),
        ("investment_advisor", Section::Details, fields::INVESTMENT_ADVISOR),
        ("distribution_advisor", Section::Details, fields::DISTRIBUTION_ADVISOR),
        ("gst_tax_planning", Section::Details, fields::GST_TAX_PLANNING),
        ("marital_deduction", Section::Details, fields::MARITAL_DEDUCTION),
        ("law_firm", Section::Details, fields::LAW_FIRM),
        ("trust_situs", Section::Details, fields::TRUST_SITUS),
    ];
    for (label, section, field) in cases {
        let instruction = classify(label, "x");
        assert_eq!(instruction.path.section, section, "label {label:?}");
        assert_eq!(instruction.path.field, field, "label {label:?}");
        assert_eq!(instruction.merge, MergeMode::OverwriteScalar, "label {label:?}");
    }
}

#[test]
fn test_grantor_aliases() {
    for label in ["grantor", "settlor", "trustor", "co-grantor"] {
        let instruction = classify(label, "Jane Doe");
        assert_eq!(instruction.path.field, fields::GRANTORS);
        assert_eq!(instruction.merge, MergeMode::AppendUniqueList);
    }
}

#[test]
fn test_successor_grantor_is_not_a_grantor() {
    let instruction = classify("successor_grantor", "Jane Doe");
    assert_ne!(instruction.path.field, fields::GRANTORS);
    // Nothing narrower claims it, so it lands in the fallback bucket.
    assert_eq!(instruction.rule, "unclassified");
    assert_eq!(instruction.path.field, fields::OTHER_PROVISIONS);
}

#[test]
fn test_trustee_powers_beats_trustee_roster() {
    let instruction = classify("Trustee_Powers_and_Duties", "may invest freely");
    assert_eq!(instruction.path.section, Section::Summary);
    assert_eq!(instruction.path.field, fields::TRUSTEE_POWERS_AND_DUTIES);
    assert_eq!(instruction.merge, MergeMode::AppendScalar);
}

#[test]
fn test_trustee_three_way_split() {
    let special = classify("special_trustee", "Pet Committee");
    assert_eq!(special.rule, "special_trustee");
    assert_eq!(special.path.field, fields::OTHER_PROVISIONS);
    assert_eq!(special.merge, MergeMode::OpenMapInsert);

    let committee = classify("trustee_committee", "The Committee");
    assert_eq!(committee.rule, "special_trustee");

    let successor = classify("alternate_trustee", "John Smith");
    assert_eq!(successor.path.field, fields::SUCCESSOR_TRUSTEES);

    let plain = classify("trustee", "Jane Doe");
    assert_eq!(plain.path.field, fields::TRUSTEES);
}

#[test]
fn test_beneficiary_disambiguation_priority() {
    // Lifetime outranks everything else.
    let lifetime = classify("lifetime_beneficiary", "Jane");
    assert_eq!(lifetime.path.field, fields::PRIMARY_BENEFICIARIES);

    let during = classify("beneficiary_during_grantors_life", "Jane");
    assert_eq!(during.path.field, fields::PRIMARY_BENEFICIARIES);

    // Contingency outranks a bare "primary" substring.
    let both = classify("primary_contingent_beneficiary", "Jane");
    assert_eq!(both.path.field, fields::CONTINGENT_BENEFICIARIES);

    let remainder = classify("remainder_beneficiaries", "Jane");
    assert_eq!(remainder.path.field, fields::CONTINGENT_BENEFICIARIES);

    let alternate = classify("alternate_beneficiary", "Jane");
    assert_eq!(alternate.path.field, fields::CONTINGENT_BENEFICIARIES);

    let primary = classify("primary_beneficiaries", "Jane");
    assert_eq!(primary.path.field, fields::PRIMARY_BENEFICIARIES);

    let current = classify("current beneficiary", "Jane");
    assert_eq!(current.path.field, fields::PRIMARY_BENEFICIARIES);

    // A bare beneficiary label matches no branch and falls through.
    let bare = classify("beneficiaries", "Jane");
    assert_eq!(bare.rule, "unclassified");
}

#[test]
fn test_unmatched_beneficiary_labels_skip_narrative_rules() {
    // Role text must not be concatenated into a narrative field just
    // because the label shares a substring with one.
    let distributions = classify("beneficiary_distributions", "paid quarterly");
    assert_ne!(distributions.path.field, fields::DISTRIBUTION_PROVISIONS);
    assert_eq!(distributions.rule, "unclassified");
    assert_eq!(distributions.path.section, Section::Details);
    assert_eq!(distributions.path.field, fields::OTHER_PROVISIONS);

    let powers = classify("beneficiary_powers", "may demand income");
    assert_ne!(powers.path.field, fields::TRUSTEE_POWERS_AND_DUTIES);
    assert_eq!(powers.rule, "unclassified");

    // The boolean rules and the specialized-role bucket may still claim
    // such labels; only the narratives are skipped.
    let advocate = classify("beneficiary_advocate", "Some Person");
    assert_eq!(advocate.rule, "specialized_role");
}

#[test]
fn test_narrative_rules() {
    let cases = [
        ("purpose", fields::PURPOSE_AND_INTENT),
        ("statement_of_intent", fields::PURPOSE_AND_INTENT),
        ("how_the_trust_works", fields::HOW_THE_TRUST_WORKS),
        ("trust_operation", fields::HOW_THE_TRUST_WORKS),
        ("distribution_provisions", fields::DISTRIBUTION_PROVISIONS),
        ("powers", fields::TRUSTEE_POWERS_AND_DUTIES),
        ("fiduciary_duties", fields::TRUSTEE_POWERS_AND_DUTIES),
        ("amendment", fields::AMENDMENT_AND_TERMINATION),
        ("termination_provisions", fields::AMENDMENT_AND_TERMINATION),
        ("special_provision", fields::SPECIAL_PROVISIONS),
    ];
    for (label, field) in cases {
        let instruction = classify(label, "narrative text");
        assert_eq!(instruction.path.section, Section::Summary, "label {label:?}");
        assert_eq!(instruction.path.field, field, "label {label:?}");
        assert_eq!(instruction.merge, MergeMode::AppendScalar, "label {label:?}");
    }
}

#[test]
fn test_grantor_intent_goes_to_the_roster() {
    // "grantor_intent" carries both a role term and a narrative term;
    // the grantor roster rule sits earlier in the table and wins.
    let instruction = classify("grantor_intent", "to provide for my children");
    assert_eq!(instruction.path.field, fields::GRANTORS);
}

#[test]
fn test_specialized_role_bucket() {
    for label in [
        "advisory_committee",
        "trust_advisor",
        "investment adviser",
        "property_manager",
        "beneficiary_advocate",
        "guardian_of_minor",
    ] {
        let instruction = classify(label, "Some Person");
        assert_eq!(instruction.rule, "specialized_role", "label {label:?}");
        assert_eq!(instruction.path.section, Section::Details);
        assert_eq!(instruction.path.field, fields::OTHER_PROVISIONS);
        assert_eq!(instruction.merge, MergeMode::OpenMapInsert);
    }
}

#[test]
fn test_fallback_routing_by_length() {
    let long_text = "x".repeat(150);
    let long = classify("mystery_label", &long_text);
    assert_eq!(long.path.section, Section::Summary);
    assert_eq!(long.path.field, fields::OTHER_SUMMARY_PROVISIONS);

    let short = classify("mystery_label", &"x".repeat(20));
    assert_eq!(short.path.section, Section::Details);
    assert_eq!(short.path.field, fields::OTHER_PROVISIONS);

    // Exactly at the threshold stays in Details.
    let at = classify("mystery_label", &"x".repeat(100));
    assert_eq!(at.path.field, fields::OTHER_PROVISIONS);
}

#[test]
fn test_classify_is_deterministic() {
    let a = classify("Lifetime_Beneficiary", "Jane Doe");
    let b = classify("Lifetime_Beneficiary", "Jane Doe");
    assert_eq!(a, b);
}

// --- assembly ---

#[test]
fn test_citations_cover_every_span_in_order() {
    let spans = vec![
        ExtractionSpan::new("grantor", "Jane Doe").with_interval(10, 18),
        ExtractionSpan::new("mystery", "short"),
        ExtractionSpan::new("trustee", "Acme Bank"),
    ];
    let document = assemble(spans);

    assert_eq!(document.citations.len(), 3);
    assert_eq!(document.citations[0].key, "grantor");
    assert_eq!(document.citations[0].location.start, 10);
    assert_eq!(document.citations[1].key, "mystery");
    // Missing interval defaults to (0, text length).
    assert_eq!(document.citations[1].location.start, 0);
    assert_eq!(document.citations[1].location.end, 5);
    assert_eq!(document.citations[2].key, "trustee");
}

#[test]
fn test_list_dedup_preserves_first_seen_order() {
    let spans = vec![
        ExtractionSpan::new("grantor", "Jane Doe"),
        ExtractionSpan::new("settlor", "John Roe"),
        ExtractionSpan::new("grantor", "Jane Doe"),
    ];
    let document = assemble(spans);
    assert_eq!(
        document.basic_information.get(fields::GRANTORS),
        Some(&list(&["Jane Doe", "John Roe"]))
    );
    // Dedup never suppresses citations.
    assert_eq!(document.citations.len(), 3);
}

#[test]
fn test_list_dedup_is_case_sensitive() {
    let spans = vec![
        ExtractionSpan::new("trustee", "Jane Doe"),
        ExtractionSpan::new("trustee", "JANE DOE"),
    ];
    let document = assemble(spans);
    assert_eq!(
        document.basic_information.get(fields::TRUSTEES),
        Some(&list(&["Jane Doe", "JANE DOE"]))
    );
}

#[test]
fn test_scalar_overwrite_is_last_write_wins() {
    let spans = vec![
        ExtractionSpan::new("trust_name", "Old Name"),
        ExtractionSpan::new("trust_name", "The Doe Family Trust"),
    ];
    let document = assemble(spans);
    assert_eq!(
        document.basic_information.get(fields::TRUST_NAME),
        Some(&scalar("The Doe Family Trust"))
    );
}

#[test]
fn test_narrative_append_concatenates_with_single_space() {
    let spans = vec![
        ExtractionSpan::new("purpose", "To provide for the family."),
        ExtractionSpan::new("intent", "To minimize estate tax."),
    ];
    let document = assemble(spans);
    assert_eq!(
        document.summary.get(fields::PURPOSE_AND_INTENT),
        Some(&scalar("To provide for the family. To minimize estate tax."))
    );
}

#[test]
fn test_boolean_derivation_from_presence() {
    let document = assemble(vec![ExtractionSpan::new(
        "spendthrift_clause",
        "yes, per Article 5",
    )]);
    assert_eq!(
        document.details.get(fields::SPENDTHRIFT_PROVISION),
        Some(&scalar("yes"))
    );

    // An empty-text span yields "no", not "yes".
    let document = assemble(vec![ExtractionSpan::new("no_contest_clause", "")]);
    assert_eq!(
        document.details.get(fields::NO_CONTEST_CLAUSE),
        Some(&scalar("no"))
    );
}

#[test]
fn test_open_map_keyed_by_original_label() {
    let spans = vec![
        ExtractionSpan::new("Special_Trustee", "Alice, Bob"),
        ExtractionSpan::new("Special_Trustee", "Alice, Bob, Carol"),
        ExtractionSpan::new("pet_guardian", "Rex's caretaker"),
    ];
    let document = assemble(spans);
    assert_eq!(
        document.details.get(fields::OTHER_PROVISIONS),
        Some(&FieldValue::Map(vec![
            // Label collision overwrites; key keeps original casing.
            ("Special_Trustee".to_string(), "Alice, Bob, Carol".to_string()),
            ("pet_guardian".to_string(), "Rex's caretaker".to_string()),
        ]))
    );
}

#[test]
fn test_assemble_empty_input() {
    let document = assemble(Vec::new());
    assert!(document.citations.is_empty());
    assert!(document.basic_information.is_empty());
    assert!(document.summary.is_empty());
    assert!(document.details.is_empty());
}

// --- defaulting ---

#[test]
fn test_schema_completeness_on_empty_input() {
    let schema = Schema::trust_default();
    let mut document = assemble(Vec::new());
    fill_defaults(&mut document, &schema, "Not specified");

    for section in Section::all() {
        for def in schema.section_defs(section) {
            assert!(
                document.section(section).contains(&def.name),
                "{section}.{} missing after defaulting",
                def.name
            );
        }
    }
    assert_eq!(
        document.basic_information.get(fields::GRANTORS),
        Some(&list(&[]))
    );
    assert_eq!(
        document.details.get(fields::SPENDTHRIFT_PROVISION),
        Some(&scalar("no"))
    );
    assert_eq!(
        document.details.get(fields::OTHER_PROVISIONS),
        Some(&FieldValue::Map(Vec::new()))
    );
    assert_eq!(
        document.summary.get(fields::PURPOSE_AND_INTENT),
        Some(&scalar("Not specified"))
    );
}

#[test]
fn test_defaulting_never_overwrites_populated_fields() {
    let schema = Schema::trust_default();
    let mut document = assemble(vec![
        ExtractionSpan::new("trust_name", "The Doe Family Trust"),
        ExtractionSpan::new("grantor", "Jane Doe"),
    ]);
    fill_defaults(&mut document, &schema, "Not specified");

    assert_eq!(
        document.basic_information.get(fields::TRUST_NAME),
        Some(&scalar("The Doe Family Trust"))
    );
    assert_eq!(
        document.basic_information.get(fields::GRANTORS),
        Some(&list(&["Jane Doe"]))
    );
}

#[test]
fn test_defaulting_is_idempotent() {
    let schema = Schema::trust_default();
    let mut once = assemble(vec![ExtractionSpan::new("grantor", "Jane Doe")]);
    fill_defaults(&mut once, &schema, "Not specified");

    let mut twice = once.clone();
    fill_defaults(&mut twice, &schema, "Not specified");
    assert_eq!(once, twice);
}

#[test]
fn test_defaulting_with_no_spans_then_serialize() {
    let schema = Schema::trust_default();
    let mut document = StructuredDocument::new();
    fill_defaults(&mut document, &schema, "Not specified");

    let json = serde_json::to_value(&document).unwrap();
    assert_eq!(json["Basic_Information"]["Trust_Name"], "Not specified");
    assert_eq!(json["Details"]["No-Contest_Clause"], "no");
    assert_eq!(json["citations"], serde_json::json!([]));
}

// --- end to end ---

#[test]
fn test_end_to_end_example() {
    let schema = Schema::trust_default();
    let spans = vec![
        ExtractionSpan::new("grantor", "Jane Doe"),
        ExtractionSpan::new("successor_trustee", "John Smith"),
        ExtractionSpan::new("spendthrift_clause", "yes, per Article 5"),
    ];

    let mut document = assemble(spans);
    fill_defaults(&mut document, &schema, "Not specified");

    assert_eq!(
        document.basic_information.get(fields::GRANTORS),
        Some(&list(&["Jane Doe"]))
    );
    assert_eq!(
        document.basic_information.get(fields::SUCCESSOR_TRUSTEES),
        Some(&list(&["John Smith"]))
    );
    assert_eq!(
        document.details.get(fields::SPENDTHRIFT_PROVISION),
        Some(&scalar("yes"))
    );

    // Every other declared field carries its type-appropriate default.
    for section in Section::all() {
        for def in schema.section_defs(section) {
            assert!(document.section(section).contains(&def.name));
        }
    }
    assert_eq!(document.citations.len(), 3);
}
