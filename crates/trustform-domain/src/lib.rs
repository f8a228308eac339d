//! Trustform Domain Layer
//!
//! This crate contains the data model shared by every stage of the trust
//! document pipeline: the labeled spans produced by the extraction engine,
//! the template schema the output must conform to, the structured document
//! being assembled, and the classification instructions that connect the
//! two.
//!
//! ## Key Concepts
//!
//! - **ExtractionSpan**: a labeled, offset-located excerpt of source text
//!   emitted by the upstream extraction engine
//! - **Schema**: the declared shape of the output (sections, fields, field
//!   kinds), loaded once from the template artifact
//! - **StructuredDocument**: the assembled output — three sections
//!   mirroring the schema plus a citation list
//! - **Instruction**: a pure classification result (target path + merge
//!   mode) produced per span by the label resolver
//!
//! ## Architecture
//!
//! Classification and assembly logic live in `trustform-engine`;
//! infrastructure (the remote engine client, configuration loading) lives
//! in `trustform-extract`. This crate only defines the shapes and the
//! trait boundary between them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod instruction;
pub mod schema;
pub mod span;
pub mod traits;

// Re-exports for convenience
pub use document::{Citation, FieldTable, FieldValue, StructuredDocument};
pub use instruction::{Instruction, MergeMode, TargetPath};
pub use schema::{FieldDef, FieldKind, Schema, SchemaError, Section};
pub use span::{CharInterval, ExtractionSpan};
