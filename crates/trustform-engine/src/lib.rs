//! Trustform Engine
//!
//! The label resolution and document assembly core: the only part of the
//! system with real decision logic.
//!
//! # Overview
//!
//! The upstream extraction engine emits loosely-named labeled spans. This
//! crate classifies each span onto the trust template, accumulates the
//! results into a structured document, and fills every remaining schema
//! gap so the output is always schema-complete.
//!
//! # Architecture
//!
//! ```text
//! spans → resolver (per span) → assembler (document + citations) → defaulter
//! ```
//!
//! - **Resolver**: an ordered, first-match-wins rule table mapping a
//!   `(label, text)` pair to a target schema path and merge mode. Pure
//!   and total: every input resolves to something.
//! - **Assembler**: applies the resolver to every span in input order,
//!   recording one citation per span unconditionally.
//! - **Defaulter**: fills schema fields the assembler left absent with
//!   kind-appropriate defaults.
//!
//! The whole pipeline is synchronous, allocation-local, and free of
//! shared mutable state; it is safe to run concurrently for independent
//! requests.
//!
//! # Example
//!
//! ```
//! use trustform_domain::{ExtractionSpan, FieldValue, Schema};
//! use trustform_engine::{assemble, fill_defaults};
//!
//! let spans = vec![
//!     ExtractionSpan::new("grantor", "Jane Doe"),
//!     ExtractionSpan::new("successor_trustee", "John Smith"),
//! ];
//!
//! let mut document = assemble(spans);
//! fill_defaults(&mut document, &Schema::trust_default(), "Not specified");
//!
//! assert_eq!(
//!     document.basic_information.get("Grantor(s)"),
//!     Some(&FieldValue::List(vec!["Jane Doe".to_string()]))
//! );
//! assert_eq!(document.citations.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod assembler;
mod defaulter;
mod resolver;

#[cfg(test)]
mod tests;

pub use assembler::assemble;
pub use defaulter::fill_defaults;
pub use resolver::{classify, normalize_label, Modifiers, Rule, RuleInput, RULES};
