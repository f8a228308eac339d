//! Label resolution - the ordered rule table
//!
//! Maps one `(label, text)` pair to a target schema path and merge mode.
//! The rule order is a first-class invariant: narrow, high-precision
//! rules must claim a label before broader substring rules would
//! otherwise misclassify it. Reordering changes output for ambiguous
//! labels.

use trustform_domain::schema::fields;
use trustform_domain::{Instruction, MergeMode, Section, TargetPath};

/// Text length above which an unclassified span is treated as narrative
/// prose and routed to the Summary fallback bucket instead of Details.
pub(crate) const NARRATIVE_FALLBACK_THRESHOLD: usize = 100;

/// Normalize a raw extraction label to its comparison key: lower-case
/// with spaces, underscores, and hyphens stripped.
///
/// The key is the sole input to rule matching; span text is consulted
/// only for boolean derivation and the length-based fallback.
pub fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .collect()
}

/// Modifier predicates evaluated over the comparison key.
///
/// Non-exclusive booleans consulted by the role and beneficiary rules;
/// a key can carry several modifiers at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// successor / alternate / backup / secondary
    pub is_successor: bool,
    /// contingent / upon-death / if-no / remainder
    pub is_contingent: bool,
    /// initial / current / primary / first
    pub is_initial: bool,
    /// lifetime / living / during-life
    pub is_lifetime: bool,
}

impl Modifiers {
    /// Detect modifiers in a normalized key
    pub fn detect(key: &str) -> Self {
        Self {
            is_successor: contains_any(key, &["successor", "alternate", "backup", "secondary"]),
            is_contingent: contains_any(key, &["contingent", "upondeath", "ifno", "remainder"]),
            is_initial: contains_any(key, &["initial", "current", "primary", "first"]),
            is_lifetime: contains_any(key, &["lifetime", "living", "duringlife"]),
        }
    }
}

fn contains_any(key: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| key.contains(t))
}

// Beneficiary-umbrella labels unclaimed by the disambiguation rules
// must never reach the narrative rules.
fn beneficiary(i: &RuleInput<'_>) -> bool {
    i.key.contains("beneficiar")
}

/// Everything a rule may consult when matching or resolving
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// Normalized comparison key
    pub key: &'a str,
    /// Span text (boolean derivation and length-based fallback only)
    pub text: &'a str,
    /// Modifier predicates for the key
    pub modifiers: Modifiers,
}

/// One entry in the ordered rule table
pub struct Rule {
    /// Rule name, reported in the resulting instruction for tracing
    pub name: &'static str,
    /// Whether this rule claims the span
    pub applies: fn(&RuleInput<'_>) -> bool,
    /// The instruction this rule produces once it has claimed the span
    pub resolve: fn(&RuleInput<'_>) -> Instruction,
}

fn overwrite(rule: &'static str, section: Section, field: &'static str) -> Instruction {
    Instruction::new(rule, TargetPath::new(section, field), MergeMode::OverwriteScalar)
}

fn narrative(rule: &'static str, field: &'static str) -> Instruction {
    Instruction::new(
        rule,
        TargetPath::new(Section::Summary, field),
        MergeMode::AppendScalar,
    )
}

fn roster(rule: &'static str, field: &'static str) -> Instruction {
    Instruction::new(
        rule,
        TargetPath::new(Section::BasicInformation, field),
        MergeMode::AppendUniqueList,
    )
}

fn yes_no(rule: &'static str, field: &'static str) -> Instruction {
    Instruction::new(
        rule,
        TargetPath::new(Section::Details, field),
        MergeMode::DeriveBoolean,
    )
}

fn details_bucket(rule: &'static str) -> Instruction {
    Instruction::new(
        rule,
        TargetPath::new(Section::Details, fields::OTHER_PROVISIONS),
        MergeMode::OpenMapInsert,
    )
}

fn summary_bucket(rule: &'static str) -> Instruction {
    Instruction::new(
        rule,
        TargetPath::new(Section::Summary, fields::OTHER_SUMMARY_PROVISIONS),
        MergeMode::OpenMapInsert,
    )
}

/// The ordered rule table, evaluated first-match-wins.
///
/// Grouped as: exact-concept scalars, party rosters (with the
/// trustee-powers carve-out ahead of the trustee roster), beneficiary
/// disambiguation, narrative summaries, derived booleans, the
/// specialized-role bucket, and the unconditional fallback.
pub static RULES: &[Rule] = &[
    Rule {
        name: "trust_name",
        applies: |i| i.key.contains("trustname"),
        resolve: |_| overwrite("trust_name", Section::BasicInformation, fields::TRUST_NAME),
    },
    Rule {
        name: "trust_type",
        applies: |i| i.key.contains("trusttype"),
        resolve: |_| overwrite("trust_type", Section::BasicInformation, fields::TRUST_TYPE),
    },
    Rule {
        name: "effective_date",
        applies: |i| contains_any(i.key, &["effectivedate", "trustdate"]),
        resolve: |_| {
            overwrite(
                "effective_date",
                Section::BasicInformation,
                fields::EFFECTIVE_DATE,
            )
        },
    },
    Rule {
        name: "tax_id",
        applies: |i| contains_any(i.key, &["taxid", "ein"]),
        resolve: |_| overwrite("tax_id", Section::Details, fields::TRUST_TAX_ID),
    },
    Rule {
        name: "state_of_formation",
        applies: |i| contains_any(i.key, &["stateofformation", "governinglaw"]),
        resolve: |_| {
            overwrite(
                "state_of_formation",
                Section::Details,
                fields::STATE_OF_FORMATION,
            )
        },
    },
    Rule {
        name: "trust_protector",
        applies: |i| i.key.contains("trustprotector"),
        resolve: |_| overwrite("trust_protector", Section::Details, fields::TRUST_PROTECTOR),
    },
    Rule {
        name: "investment_advisor",
        applies: |i| i.key.contains("investmentadvisor"),
        resolve: |_| {
            overwrite(
                "investment_advisor",
                Section::Details,
                fields::INVESTMENT_ADVISOR,
            )
        },
    },
    // Must precede the distribution narrative rule below.
    Rule {
        name: "distribution_advisor",
        applies: |i| i.key.contains("distributionadvisor"),
        resolve: |_| {
            overwrite(
                "distribution_advisor",
                Section::Details,
                fields::DISTRIBUTION_ADVISOR,
            )
        },
    },
    Rule {
        name: "gst_tax_planning",
        applies: |i| contains_any(i.key, &["gsttax", "gstplanning"]),
        resolve: |_| overwrite("gst_tax_planning", Section::Details, fields::GST_TAX_PLANNING),
    },
    Rule {
        name: "marital_deduction",
        applies: |i| i.key.contains("maritaldeduction"),
        resolve: |_| {
            overwrite(
                "marital_deduction",
                Section::Details,
                fields::MARITAL_DEDUCTION,
            )
        },
    },
    Rule {
        name: "law_firm",
        applies: |i| i.key.contains("lawfirm"),
        resolve: |_| overwrite("law_firm", Section::Details, fields::LAW_FIRM),
    },
    Rule {
        name: "trust_situs",
        applies: |i| contains_any(i.key, &["trustsitus", "situs"]),
        resolve: |_| overwrite("trust_situs", Section::Details, fields::TRUST_SITUS),
    },
    // A successor grantor is not a grantor; let it fall through. Labels
    // like "beneficiary_during_grantors_life" mention the grantor but
    // name a beneficiary, so beneficiary keys are excluded here and
    // handled by the disambiguation rules below.
    Rule {
        name: "grantor",
        applies: |i| {
            contains_any(i.key, &["grantor", "settlor", "trustor"])
                && !i.modifiers.is_successor
                && !beneficiary(i)
        },
        resolve: |_| roster("grantor", fields::GRANTORS),
    },
    // Must precede the trustee roster rules: "trustee_powers" is a
    // narrative, not a party.
    Rule {
        name: "trustee_powers",
        applies: |i| i.key.contains("trustee") && contains_any(i.key, &["power", "duties"]),
        resolve: |_| narrative("trustee_powers", fields::TRUSTEE_POWERS_AND_DUTIES),
    },
    Rule {
        name: "special_trustee",
        applies: |i| i.key.contains("trustee") && contains_any(i.key, &["special", "committee"]),
        resolve: |_| details_bucket("special_trustee"),
    },
    Rule {
        name: "successor_trustee",
        applies: |i| i.key.contains("trustee") && i.modifiers.is_successor,
        resolve: |_| roster("successor_trustee", fields::SUCCESSOR_TRUSTEES),
    },
    Rule {
        name: "trustee",
        applies: |i| i.key.contains("trustee"),
        resolve: |_| roster("trustee", fields::TRUSTEES),
    },
    // Beneficiary disambiguation, in priority order. A span can look
    // both "contingent" and "remainder"; contingency outranks a bare
    // "primary" substring. A beneficiary label matching none of the
    // three branches stays unclassified and skips the narrative rules
    // entirely: it may only land in the boolean rules, the
    // specialized-role bucket, or the fallback.
    Rule {
        name: "lifetime_beneficiary",
        applies: |i| {
            i.key.contains("beneficiar")
                && (i.modifiers.is_lifetime || i.key.contains("duringgrantor"))
        },
        resolve: |_| roster("lifetime_beneficiary", fields::PRIMARY_BENEFICIARIES),
    },
    Rule {
        name: "contingent_beneficiary",
        applies: |i| {
            i.key.contains("beneficiar")
                && (i.modifiers.is_contingent || i.key.contains("alternate"))
        },
        resolve: |_| roster("contingent_beneficiary", fields::CONTINGENT_BENEFICIARIES),
    },
    Rule {
        name: "primary_beneficiary",
        applies: |i| {
            i.key.contains("beneficiar")
                && (i.modifiers.is_initial || i.key.contains("upondeath"))
        },
        resolve: |_| roster("primary_beneficiary", fields::PRIMARY_BENEFICIARIES),
    },
    Rule {
        name: "purpose_and_intent",
        applies: |i| !beneficiary(i) && contains_any(i.key, &["purpose", "intent"]),
        resolve: |_| narrative("purpose_and_intent", fields::PURPOSE_AND_INTENT),
    },
    Rule {
        name: "how_the_trust_works",
        applies: |i| !beneficiary(i) && contains_any(i.key, &["howthetrustworks", "operation"]),
        resolve: |_| narrative("how_the_trust_works", fields::HOW_THE_TRUST_WORKS),
    },
    Rule {
        name: "distribution_provisions",
        applies: |i| !beneficiary(i) && i.key.contains("distribution"),
        resolve: |_| narrative("distribution_provisions", fields::DISTRIBUTION_PROVISIONS),
    },
    // Catches power/duties spans not already claimed by trustee_powers.
    Rule {
        name: "powers_and_duties",
        applies: |i| !beneficiary(i) && contains_any(i.key, &["power", "duties"]),
        resolve: |_| narrative("powers_and_duties", fields::TRUSTEE_POWERS_AND_DUTIES),
    },
    Rule {
        name: "amendment_and_termination",
        applies: |i| !beneficiary(i) && contains_any(i.key, &["amendment", "termination"]),
        resolve: |_| narrative("amendment_and_termination", fields::AMENDMENT_AND_TERMINATION),
    },
    Rule {
        name: "special_provisions",
        applies: |i| {
            !beneficiary(i) && i.key.contains("special") && i.key.contains("provision")
        },
        resolve: |_| narrative("special_provisions", fields::SPECIAL_PROVISIONS),
    },
    // Presence of the span drives the flag, not its content.
    Rule {
        name: "spendthrift",
        applies: |i| i.key.contains("spendthrift"),
        resolve: |_| yes_no("spendthrift", fields::SPENDTHRIFT_PROVISION),
    },
    Rule {
        name: "no_contest",
        applies: |i| i.key.contains("nocontest"),
        resolve: |_| yes_no("no_contest", fields::NO_CONTEST_CLAUSE),
    },
    Rule {
        name: "specialized_role",
        applies: |i| {
            contains_any(
                i.key,
                &[
                    "advisor", "adviser", "committee", "protector", "manager", "advocate",
                    "guardian",
                ],
            )
        },
        resolve: |_| details_bucket("specialized_role"),
    },
    // Long unclassified prose goes to the Summary bucket so it cannot
    // crowd the short structured Details bucket.
    Rule {
        name: "unclassified",
        applies: |_| true,
        resolve: |i| {
            if i.text.chars().count() > NARRATIVE_FALLBACK_THRESHOLD {
                summary_bucket("unclassified")
            } else {
                details_bucket("unclassified")
            }
        },
    },
];

/// Classify one span into a merge instruction.
///
/// Pure and deterministic given `(label, text)`; total by construction,
/// since the table ends with an unconditional fallback.
pub fn classify(label: &str, text: &str) -> Instruction {
    let key = normalize_label(label);
    let input = RuleInput {
        key: &key,
        text,
        modifiers: Modifiers::detect(&key),
    };
    for rule in RULES {
        if (rule.applies)(&input) {
            return (rule.resolve)(&input);
        }
    }
    unreachable!("rule table ends with an unconditional fallback")
}
