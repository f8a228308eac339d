//! Classification instructions - the pure output of the label resolver

use crate::schema::Section;
use std::fmt;

/// How a classified span's text is merged into its target field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Replace any prior value (last-write-wins)
    OverwriteScalar,
    /// Concatenate onto any prior value with a single space
    AppendScalar,
    /// Push unless the exact string is already present
    AppendUniqueList,
    /// Non-empty text yields "yes", empty text yields "no"
    DeriveBoolean,
    /// `map[original label] = text`, overwriting on label collision
    OpenMapInsert,
}

/// A schema location: section plus field name.
///
/// Field names are static because every resolvable target is a declared
/// schema field; open-map entries are keyed by the original span label at
/// assembly time, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetPath {
    /// Target section
    pub section: Section,
    /// Target field within the section
    pub field: &'static str,
}

impl TargetPath {
    /// Create a target path
    pub fn new(section: Section, field: &'static str) -> Self {
        Self { section, field }
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.field)
    }
}

/// The resolver's verdict for one span: which rule fired, where the text
/// goes, and how it merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Name of the rule that claimed the span
    pub rule: &'static str,
    /// Target schema location
    pub path: TargetPath,
    /// Merge semantics at the target
    pub merge: MergeMode,
}

impl Instruction {
    /// Create an instruction
    pub fn new(rule: &'static str, path: TargetPath, merge: MergeMode) -> Self {
        Self { rule, path, merge }
    }
}
